use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdminError;

pub type PlayerId = u32;
pub type TeamId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    Ol,
    Dl,
    De,
    Lb,
    Cb,
    S,
    K,
}

impl Position {
    pub const ALL: [Position; 11] = [
        Position::Qb,
        Position::Rb,
        Position::Wr,
        Position::Te,
        Position::Ol,
        Position::Dl,
        Position::De,
        Position::Lb,
        Position::Cb,
        Position::S,
        Position::K,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::Ol => "OL",
            Position::Dl => "DL",
            Position::De => "DE",
            Position::Lb => "LB",
            Position::Cb => "CB",
            Position::S => "S",
            Position::K => "K",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = AdminError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AdminError::InvalidPosition(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    pub position: Position,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo_path: String,
    #[serde(default = "default_years_played")]
    pub years_played: u32,
    #[serde(default)]
    pub current_year: bool,
}

fn default_years_played() -> u32 {
    1
}

impl Player {
    /// First letter of every word in the name, e.g. "Player 10" -> "P1".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub w: u32,
    pub l: u32,
    pub t: u32,
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.w, self.l, self.t)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub captain_id: PlayerId,
    #[serde(default)]
    pub logo_path: String,
    pub year: i32,
    #[serde(default)]
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub record: TeamRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Championship {
    pub id: u32,
    pub year: i32,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub id: u32,
    pub year: i32,
    pub award_name: String,
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentRecord {
    pub id: u32,
    pub year: i32,
    pub record_name: String,
    pub record_value: String,
    pub player_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub championships: Vec<Championship>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub records: Vec<TournamentRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Championships,
    Awards,
    Records,
}

impl HistoryKind {
    pub const ALL: [HistoryKind; 3] = [
        HistoryKind::Championships,
        HistoryKind::Awards,
        HistoryKind::Records,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HistoryKind::Championships => "championship",
            HistoryKind::Awards => "award",
            HistoryKind::Records => "record",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HistoryKind::Championships => HistoryKind::Awards,
            HistoryKind::Awards => HistoryKind::Records,
            HistoryKind::Records => HistoryKind::Championships,
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl History {
    pub fn len_of(&self, kind: HistoryKind) -> usize {
        match kind {
            HistoryKind::Championships => self.championships.len(),
            HistoryKind::Awards => self.awards.len(),
            HistoryKind::Records => self.records.len(),
        }
    }

    pub fn id_at(&self, kind: HistoryKind, idx: usize) -> Option<u32> {
        match kind {
            HistoryKind::Championships => self.championships.get(idx).map(|c| c.id),
            HistoryKind::Awards => self.awards.get(idx).map(|a| a.id),
            HistoryKind::Records => self.records.get(idx).map(|r| r.id),
        }
    }

    pub fn ids(&self, kind: HistoryKind) -> Vec<u32> {
        match kind {
            HistoryKind::Championships => self.championships.iter().map(|c| c.id).collect(),
            HistoryKind::Awards => self.awards.iter().map(|a| a.id).collect(),
            HistoryKind::Records => self.records.iter().map(|r| r.id).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSettings {
    /// Local kickoff time, `YYYY-MM-DDTHH:MM[:SS]`.
    pub event_date: String,
    pub event_location: String,
    pub registration_deadline: String,
    pub current_year: i32,
    pub admin_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentData {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub history: History,
    pub settings: EventSettings,
}

impl TournamentData {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    /// Players flagged for the current tournament year, in roster order.
    pub fn current_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.current_year)
    }

    pub fn team_of_player(&self, id: PlayerId) -> Option<&Team> {
        self.teams.iter().find(|t| t.players.contains(&id))
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.player(id).map(|p| p.name.as_str())
    }
}
