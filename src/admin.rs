//! Edits made from admin mode.
//!
//! Form text is parsed into drafts at the edge (`*Draft::parse`), then applied
//! to [`TournamentData`]. Callers persist the touched kinds afterwards.

use tracing::info;

use crate::error::{AdminError, AdminResult};
use crate::model::{
    Award, Championship, EventSettings, HistoryKind, Player, PlayerId, Position, Team, TeamId,
    TeamRecord, TournamentData, TournamentRecord,
};
use crate::selection::parse_selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerDraft {
    pub name: String,
    pub nickname: String,
    pub position: Position,
    pub bio: String,
    pub years_played: u32,
}

impl PlayerDraft {
    pub fn parse(
        name: &str,
        nickname: &str,
        position: &str,
        bio: &str,
        years_played: &str,
    ) -> AdminResult<Self> {
        let name = name.trim();
        if name.is_empty() || position.trim().is_empty() {
            return Err(AdminError::Required("Name and position are required!"));
        }
        let years_played = match years_played.trim() {
            "" => 1,
            raw => parse_number::<u32>(raw)?,
        };
        Ok(Self {
            name: name.to_string(),
            nickname: nickname.trim().replace('"', ""),
            position: position.parse()?,
            bio: bio.trim().to_string(),
            years_played,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub name: String,
    pub captain_id: Option<PlayerId>,
    pub players: Vec<PlayerId>,
}

impl TeamDraft {
    /// `selection` is the comma-joined id list produced by the team editor.
    pub fn parse(name: &str, captain_id: Option<PlayerId>, selection: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            captain_id,
            players: parse_selection(selection),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionshipDraft {
    pub year: i32,
    pub team_name: String,
    pub score: Option<String>,
}

impl ChampionshipDraft {
    pub fn parse(year: &str, team_name: &str, score: &str) -> AdminResult<Self> {
        let team_name = team_name.trim();
        if year.trim().is_empty() || team_name.is_empty() {
            return Err(AdminError::Required("Year and team are required!"));
        }
        Ok(Self {
            year: parse_number(year)?,
            team_name: team_name.to_string(),
            score: non_empty(score),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardDraft {
    pub year: i32,
    pub award_name: String,
    pub player_id: PlayerId,
    pub team_name: Option<String>,
}

impl AwardDraft {
    pub fn parse(
        year: &str,
        award_name: &str,
        player_id: Option<PlayerId>,
        team_name: &str,
    ) -> AdminResult<Self> {
        let award_name = award_name.trim();
        let Some(player_id) = player_id else {
            return Err(AdminError::Required("Year and player are required!"));
        };
        if year.trim().is_empty() || award_name.is_empty() {
            return Err(AdminError::Required("Year and player are required!"));
        }
        Ok(Self {
            year: parse_number(year)?,
            award_name: award_name.to_string(),
            player_id,
            team_name: non_empty(team_name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub year: i32,
    pub record_name: String,
    pub record_value: String,
    pub player_name: String,
}

impl RecordDraft {
    pub fn parse(
        year: &str,
        record_name: &str,
        record_value: &str,
        player_name: &str,
    ) -> AdminResult<Self> {
        let fields = [year, record_name, record_value, player_name];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(AdminError::Required("All fields are required!"));
        }
        Ok(Self {
            year: parse_number(year)?,
            record_name: record_name.trim().to_string(),
            record_value: record_value.trim().to_string(),
            player_name: player_name.trim().to_string(),
        })
    }
}

/// Tracks typed characters outside admin mode and reports when the tail
/// matches the unlock keyword.
#[derive(Debug, Clone)]
pub struct AdminUnlock {
    keyword: String,
    buffer: String,
}

impl AdminUnlock {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            buffer: String::new(),
        }
    }

    pub fn push(&mut self, c: char) -> bool {
        if self.keyword.is_empty() {
            return false;
        }
        self.buffer.extend(c.to_lowercase());
        let excess = self
            .buffer
            .chars()
            .count()
            .saturating_sub(self.keyword.chars().count());
        if excess > 0 {
            self.buffer = self.buffer.chars().skip(excess).collect();
        }
        if self.buffer == self.keyword {
            self.buffer.clear();
            return true;
        }
        false
    }
}

pub fn check_password(settings: &EventSettings, input: &str) -> AdminResult<()> {
    if input == settings.admin_password {
        Ok(())
    } else {
        Err(AdminError::WrongPassword)
    }
}

pub fn validate_player(draft: &PlayerDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.name.trim().chars().count() < 2 {
        errors.push("Name must be at least 2 characters long".to_string());
    }
    if draft.years_played < 1 {
        errors.push("Years played must be at least 1".to_string());
    }
    errors
}

pub fn validate_team(draft: &TeamDraft) -> Vec<String> {
    let mut errors = Vec::new();
    if draft.name.trim().chars().count() < 2 {
        errors.push("Team name must be at least 2 characters long".to_string());
    }
    if draft.captain_id.is_none() {
        errors.push("Captain is required".to_string());
    }
    if draft.players.is_empty() {
        errors.push("Team must have at least one player".to_string());
    }
    errors
}

/// One past the largest id in use. Fails once `u32::MAX` is taken.
fn next_id(ids: impl Iterator<Item = u32>, what: &'static str) -> AdminResult<u32> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(AdminError::IdsExhausted(what))
}

pub fn next_player_id(data: &TournamentData) -> AdminResult<PlayerId> {
    next_id(data.players.iter().map(|p| p.id), "player")
}

pub fn next_team_id(data: &TournamentData) -> AdminResult<TeamId> {
    next_id(data.teams.iter().map(|t| t.id), "team")
}

pub fn next_history_id(data: &TournamentData, kind: HistoryKind) -> AdminResult<u32> {
    next_id(data.history.ids(kind).into_iter(), kind.label())
}

/// `"The Big Birds"` -> `images/teams/the-big-birds-logo.png`.
pub fn team_logo_path(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    format!("images/teams/{slug}-logo.png")
}

pub fn add_player(data: &mut TournamentData, draft: PlayerDraft) -> AdminResult<PlayerId> {
    let errors = validate_player(&draft);
    if !errors.is_empty() {
        return Err(AdminError::Invalid(errors));
    }

    let id = next_player_id(data)?;
    let nickname = if draft.nickname.is_empty() {
        draft
            .name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    } else {
        draft.nickname
    };
    let bio = if draft.bio.is_empty() {
        format!("{} player for the Turkey Bowl.", draft.position)
    } else {
        draft.bio
    };
    let player = Player {
        id,
        name: draft.name,
        nickname,
        position: draft.position,
        bio,
        photo_path: format!("images/players/player{id}.jpg"),
        years_played: draft.years_played,
        current_year: true,
    };
    info!(id, name = %player.name, "player added");
    data.players.push(player);
    Ok(id)
}

pub fn update_player(data: &mut TournamentData, id: PlayerId, draft: PlayerDraft) -> AdminResult<()> {
    let errors = validate_player(&draft);
    if !errors.is_empty() {
        return Err(AdminError::Invalid(errors));
    }
    let player = data.player_mut(id).ok_or(AdminError::UnknownPlayer(id))?;
    player.name = draft.name;
    player.nickname = draft.nickname;
    player.position = draft.position;
    player.bio = draft.bio;
    player.years_played = draft.years_played;
    Ok(())
}

pub fn toggle_current_year(data: &mut TournamentData, id: PlayerId) -> AdminResult<bool> {
    let player = data.player_mut(id).ok_or(AdminError::UnknownPlayer(id))?;
    player.current_year = !player.current_year;
    Ok(player.current_year)
}

/// Removes the player and every team reference to them.
pub fn delete_player(data: &mut TournamentData, id: PlayerId) -> AdminResult<()> {
    let before = data.players.len();
    data.players.retain(|p| p.id != id);
    if data.players.len() == before {
        return Err(AdminError::UnknownPlayer(id));
    }
    remove_player_from_all_teams(data, id);
    info!(id, "player deleted");
    Ok(())
}

/// Drops the player from every roster. A team whose captain left gets its
/// first remaining player as captain; a team left empty is removed.
pub fn remove_player_from_all_teams(data: &mut TournamentData, id: PlayerId) {
    for team in &mut data.teams {
        team.players.retain(|pid| *pid != id);
        if team.captain_id == id {
            if let Some(first) = team.players.first() {
                team.captain_id = *first;
            }
        }
    }
    data.teams.retain(|team| !team.players.is_empty());
}

fn finalize_roster(data: &TournamentData, draft: &TeamDraft) -> AdminResult<(PlayerId, Vec<PlayerId>)> {
    let Some(captain_id) = draft.captain_id else {
        return Err(AdminError::Required("Captain is required!"));
    };
    if draft.players.is_empty() {
        return Err(AdminError::Required(
            "Please select at least one player for the team!",
        ));
    }
    if data.player(captain_id).is_none() {
        return Err(AdminError::UnknownPlayer(captain_id));
    }
    let mut players = draft.players.clone();
    if !players.contains(&captain_id) {
        players.push(captain_id);
    }
    Ok((captain_id, players))
}

pub fn add_team(data: &mut TournamentData, draft: TeamDraft) -> AdminResult<TeamId> {
    if draft.name.is_empty() || draft.captain_id.is_none() {
        return Err(AdminError::Required("Team name and captain are required!"));
    }
    let (captain_id, players) = finalize_roster(data, &draft)?;
    let errors = validate_team(&draft);
    if !errors.is_empty() {
        return Err(AdminError::Invalid(errors));
    }

    let id = next_team_id(data)?;
    let team = Team {
        id,
        logo_path: team_logo_path(&draft.name),
        name: draft.name,
        captain_id,
        year: data.settings.current_year,
        players,
        record: TeamRecord::default(),
    };
    info!(id, name = %team.name, players = team.players.len(), "team added");
    data.teams.push(team);
    Ok(id)
}

pub fn update_roster(data: &mut TournamentData, team_id: TeamId, draft: TeamDraft) -> AdminResult<()> {
    if data.team(team_id).is_none() {
        return Err(AdminError::UnknownTeam(team_id));
    }
    let (captain_id, players) = finalize_roster(data, &draft)?;
    let team = data.team_mut(team_id).ok_or(AdminError::UnknownTeam(team_id))?;
    team.captain_id = captain_id;
    team.players = players;
    info!(id = team_id, players = team.players.len(), "team roster updated");
    Ok(())
}

pub fn rename_team(data: &mut TournamentData, team_id: TeamId, name: &str) -> AdminResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AdminError::Required("Team name is required!"));
    }
    let team = data.team_mut(team_id).ok_or(AdminError::UnknownTeam(team_id))?;
    team.name = name.to_string();
    Ok(())
}

pub fn delete_team(data: &mut TournamentData, team_id: TeamId) -> AdminResult<()> {
    let before = data.teams.len();
    data.teams.retain(|t| t.id != team_id);
    if data.teams.len() == before {
        return Err(AdminError::UnknownTeam(team_id));
    }
    info!(id = team_id, "team deleted");
    Ok(())
}

/// Takes one player off a roster. Removing the captain hands the armband to
/// the first remaining player; the last player cannot be removed.
pub fn remove_from_team(data: &mut TournamentData, team_id: TeamId, player_id: PlayerId) -> AdminResult<()> {
    let team = data.team_mut(team_id).ok_or(AdminError::UnknownTeam(team_id))?;
    if !team.players.contains(&player_id) {
        return Err(AdminError::UnknownPlayer(player_id));
    }
    if team.players.len() == 1 {
        return Err(AdminError::Invalid(vec![
            "Team must have at least one player".to_string(),
        ]));
    }
    team.players.retain(|pid| *pid != player_id);
    if team.captain_id == player_id {
        if let Some(first) = team.players.first() {
            team.captain_id = *first;
        }
    }
    Ok(())
}

pub fn add_championship(data: &mut TournamentData, draft: ChampionshipDraft) -> AdminResult<u32> {
    let id = next_history_id(data, HistoryKind::Championships)?;
    data.history.championships.insert(
        0,
        Championship {
            id,
            year: draft.year,
            team_name: draft.team_name,
            score: draft.score,
        },
    );
    Ok(id)
}

pub fn update_championship(data: &mut TournamentData, id: u32, draft: ChampionshipDraft) -> AdminResult<()> {
    let entry = data
        .history
        .championships
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(AdminError::UnknownHistoryItem {
            kind: HistoryKind::Championships,
            id,
        })?;
    entry.year = draft.year;
    entry.team_name = draft.team_name;
    entry.score = draft.score;
    Ok(())
}

/// Blank team falls back to whichever team currently rosters the player.
pub fn add_award(data: &mut TournamentData, draft: AwardDraft) -> AdminResult<u32> {
    let player = data
        .player(draft.player_id)
        .ok_or(AdminError::UnknownPlayer(draft.player_id))?;
    let player_name = player.name.clone();
    let team_name = draft.team_name.or_else(|| {
        data.team_of_player(draft.player_id)
            .map(|team| team.name.clone())
    });

    let id = next_history_id(data, HistoryKind::Awards)?;
    data.history.awards.insert(
        0,
        Award {
            id,
            year: draft.year,
            award_name: draft.award_name,
            player_name,
            team_name,
            description: None,
        },
    );
    Ok(id)
}

pub fn update_award(
    data: &mut TournamentData,
    id: u32,
    year: &str,
    award_name: &str,
    player_name: &str,
    description: &str,
) -> AdminResult<()> {
    let award_name = award_name.trim();
    let player_name = player_name.trim();
    if award_name.is_empty() || player_name.is_empty() {
        return Err(AdminError::Required("Award and player are required!"));
    }
    let year = parse_number(year)?;
    let entry = data
        .history
        .awards
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or(AdminError::UnknownHistoryItem {
            kind: HistoryKind::Awards,
            id,
        })?;
    entry.year = year;
    entry.award_name = award_name.to_string();
    entry.player_name = player_name.to_string();
    entry.description = non_empty(description);
    Ok(())
}

pub fn add_record(data: &mut TournamentData, draft: RecordDraft) -> AdminResult<u32> {
    let id = next_history_id(data, HistoryKind::Records)?;
    data.history.records.insert(
        0,
        TournamentRecord {
            id,
            year: draft.year,
            record_name: draft.record_name,
            record_value: draft.record_value,
            player_name: draft.player_name,
        },
    );
    Ok(id)
}

pub fn update_record(data: &mut TournamentData, id: u32, draft: RecordDraft) -> AdminResult<()> {
    let entry = data
        .history
        .records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(AdminError::UnknownHistoryItem {
            kind: HistoryKind::Records,
            id,
        })?;
    entry.year = draft.year;
    entry.record_name = draft.record_name;
    entry.record_value = draft.record_value;
    entry.player_name = draft.player_name;
    Ok(())
}

pub fn delete_history_item(data: &mut TournamentData, kind: HistoryKind, id: u32) -> AdminResult<()> {
    let history = &mut data.history;
    let before = history.len_of(kind);
    match kind {
        HistoryKind::Championships => history.championships.retain(|c| c.id != id),
        HistoryKind::Awards => history.awards.retain(|a| a.id != id),
        HistoryKind::Records => history.records.retain(|r| r.id != id),
    }
    if history.len_of(kind) == before {
        return Err(AdminError::UnknownHistoryItem { kind, id });
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> AdminResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AdminError::InvalidNumber(raw.trim().to_string()))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
