//! Modal forms for admin edits: field model, builders, and submission.

use crate::admin::{
    self, AwardDraft, ChampionshipDraft, PlayerDraft, RecordDraft,
};
use crate::error::{AdminError, AdminResult};
use crate::model::{HistoryKind, PlayerId, Position, TeamId, TournamentData};
use crate::seed::AWARD_NAMES;
use crate::store::DataKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Choice { options: Vec<Choice>, idx: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub input: FieldInput,
}

impl FormField {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            input: FieldInput::Text(value.into()),
        }
    }

    /// Starts on the option whose value equals `current`, else the first one.
    pub fn choice(label: &'static str, options: Vec<Choice>, current: &str) -> Self {
        let idx = options.iter().position(|o| o.value == current).unwrap_or(0);
        Self {
            label,
            input: FieldInput::Choice { options, idx },
        }
    }

    pub fn value(&self) -> &str {
        match &self.input {
            FieldInput::Text(value) => value,
            FieldInput::Choice { options, idx } => {
                options.get(*idx).map(|o| o.value.as_str()).unwrap_or("")
            }
        }
    }

    pub fn display(&self) -> &str {
        match &self.input {
            FieldInput::Text(value) => value,
            FieldInput::Choice { options, idx } => {
                options.get(*idx).map(|o| o.label.as_str()).unwrap_or("")
            }
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.input, FieldInput::Choice { .. })
    }

    pub fn push_char(&mut self, c: char) {
        if let FieldInput::Text(value) = &mut self.input {
            value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let FieldInput::Text(value) = &mut self.input {
            value.pop();
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        if let FieldInput::Text(value) = &mut self.input {
            *value = text.into();
        }
    }

    pub fn cycle(&mut self, forward: bool) {
        if let FieldInput::Choice { options, idx } = &mut self.input {
            if options.is_empty() {
                return;
            }
            *idx = if forward {
                (*idx + 1) % options.len()
            } else {
                (*idx + options.len() - 1) % options.len()
            };
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddPlayer,
    EditPlayer(PlayerId),
    RenameTeam(TeamId),
    AddChampionship,
    EditChampionship(u32),
    AddAward,
    EditAward(u32),
    AddRecord,
    EditRecord(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
}

impl FormState {
    fn new(kind: FormKind, title: impl Into<String>, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            title: title.into(),
            fields,
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn field(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(FormField::value)
            .unwrap_or("")
    }

    fn field_mut(&mut self, label: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.label == label)
    }

    /// Cycles the focused choice; picking an award winner prefills their team.
    pub fn cycle_focused(&mut self, forward: bool, data: &TournamentData) {
        let Some(field) = self.focused_mut() else {
            return;
        };
        field.cycle(forward);
        let label = field.label;
        if self.kind == FormKind::AddAward && label == "Player" {
            let team = self
                .field("Player")
                .parse::<PlayerId>()
                .ok()
                .and_then(|id| data.team_of_player(id))
                .map(|team| team.name.clone())
                .unwrap_or_default();
            if let Some(team_field) = self.field_mut("Team") {
                team_field.set_text(team);
            }
        }
    }
}

fn position_choices() -> Vec<Choice> {
    Position::ALL
        .iter()
        .map(|p| Choice::new(p.label(), p.label()))
        .collect()
}

fn player_id_choices(data: &TournamentData) -> Vec<Choice> {
    let mut options = vec![Choice::new("", "Select Player")];
    options.extend(
        data.players
            .iter()
            .map(|p| Choice::new(p.id.to_string(), p.name.clone())),
    );
    options
}

fn player_name_choices(data: &TournamentData) -> Vec<Choice> {
    let mut options = vec![Choice::new("", "Select Player")];
    options.extend(
        data.players
            .iter()
            .map(|p| Choice::new(p.name.clone(), p.name.clone())),
    );
    options
}

fn team_name_choices(data: &TournamentData) -> Vec<Choice> {
    let mut options = vec![Choice::new("", "Select Team")];
    options.extend(
        data.teams
            .iter()
            .map(|t| Choice::new(t.name.clone(), t.name.clone())),
    );
    options
}

fn award_choices() -> Vec<Choice> {
    AWARD_NAMES.iter().map(|a| Choice::new(*a, *a)).collect()
}

pub fn add_player_form() -> FormState {
    FormState::new(
        FormKind::AddPlayer,
        "Add New Player",
        vec![
            FormField::text("Name", ""),
            FormField::text("Nickname", ""),
            FormField::choice("Position", position_choices(), "QB"),
            FormField::text("Bio", ""),
            FormField::text("Years Played", "1"),
        ],
    )
}

pub fn edit_player_form(data: &TournamentData, id: PlayerId) -> AdminResult<FormState> {
    let player = data.player(id).ok_or(AdminError::UnknownPlayer(id))?;
    Ok(FormState::new(
        FormKind::EditPlayer(id),
        format!("Edit {}", player.name),
        vec![
            FormField::text("Name", player.name.clone()),
            FormField::text("Nickname", player.nickname.clone()),
            FormField::choice("Position", position_choices(), player.position.label()),
            FormField::text("Bio", player.bio.clone()),
            FormField::text("Years Played", player.years_played.to_string()),
        ],
    ))
}

pub fn rename_team_form(data: &TournamentData, id: TeamId) -> AdminResult<FormState> {
    let team = data.team(id).ok_or(AdminError::UnknownTeam(id))?;
    Ok(FormState::new(
        FormKind::RenameTeam(id),
        "Rename Team",
        vec![FormField::text("Team Name", team.name.clone())],
    ))
}

pub fn add_championship_form(data: &TournamentData) -> FormState {
    FormState::new(
        FormKind::AddChampionship,
        "Add Championship",
        vec![
            FormField::text("Year", data.settings.current_year.to_string()),
            FormField::choice("Winning Team", team_name_choices(data), ""),
            FormField::text("Final Score", ""),
        ],
    )
}

pub fn add_award_form(data: &TournamentData, award_name: &str) -> FormState {
    FormState::new(
        FormKind::AddAward,
        format!("Add {award_name}"),
        vec![
            FormField::choice("Award", award_choices(), award_name),
            FormField::text("Year", data.settings.current_year.to_string()),
            FormField::choice("Player", player_id_choices(data), ""),
            FormField::text("Team", ""),
        ],
    )
}

pub fn add_record_form(data: &TournamentData) -> FormState {
    FormState::new(
        FormKind::AddRecord,
        "Add Record",
        vec![
            FormField::text("Year", data.settings.current_year.to_string()),
            FormField::text("Record Name", ""),
            FormField::text("Record Value", ""),
            FormField::choice("Player", player_name_choices(data), ""),
        ],
    )
}

pub fn edit_history_form(data: &TournamentData, kind: HistoryKind, id: u32) -> AdminResult<FormState> {
    let missing = AdminError::UnknownHistoryItem { kind, id };
    let form = match kind {
        HistoryKind::Championships => {
            let entry = data
                .history
                .championships
                .iter()
                .find(|c| c.id == id)
                .ok_or(missing)?;
            FormState::new(
                FormKind::EditChampionship(id),
                "Edit Championship",
                vec![
                    FormField::text("Year", entry.year.to_string()),
                    FormField::text("Winning Team", entry.team_name.clone()),
                    FormField::text("Final Score", entry.score.clone().unwrap_or_default()),
                ],
            )
        }
        HistoryKind::Awards => {
            let entry = data
                .history
                .awards
                .iter()
                .find(|a| a.id == id)
                .ok_or(missing)?;
            FormState::new(
                FormKind::EditAward(id),
                "Edit Award",
                vec![
                    FormField::text("Year", entry.year.to_string()),
                    FormField::text("Award", entry.award_name.clone()),
                    FormField::text("Player", entry.player_name.clone()),
                    FormField::text("Description", entry.description.clone().unwrap_or_default()),
                ],
            )
        }
        HistoryKind::Records => {
            let entry = data
                .history
                .records
                .iter()
                .find(|r| r.id == id)
                .ok_or(missing)?;
            FormState::new(
                FormKind::EditRecord(id),
                "Edit Record",
                vec![
                    FormField::text("Year", entry.year.to_string()),
                    FormField::text("Record Name", entry.record_name.clone()),
                    FormField::text("Record Value", entry.record_value.clone()),
                    FormField::text("Player", entry.player_name.clone()),
                ],
            )
        }
    };
    Ok(form)
}

/// Applies the form to `data`. Returns a status message and the kinds to persist.
pub fn submit(form: &FormState, data: &mut TournamentData) -> AdminResult<(String, DataKind)> {
    let f = |label: &str| form.field(label);
    match form.kind {
        FormKind::AddPlayer | FormKind::EditPlayer(_) => {
            let draft = PlayerDraft::parse(
                f("Name"),
                f("Nickname"),
                f("Position"),
                f("Bio"),
                f("Years Played"),
            )?;
            let msg = match form.kind {
                FormKind::EditPlayer(id) => {
                    admin::update_player(data, id, draft)?;
                    format!("Player {id} updated")
                }
                _ => {
                    let id = admin::add_player(data, draft)?;
                    format!("Player {id} added")
                }
            };
            Ok((msg, DataKind::Players))
        }
        FormKind::RenameTeam(id) => {
            admin::rename_team(data, id, f("Team Name"))?;
            Ok((format!("Team {id} renamed"), DataKind::Teams))
        }
        FormKind::AddChampionship => {
            let draft = ChampionshipDraft::parse(f("Year"), f("Winning Team"), f("Final Score"))?;
            let id = admin::add_championship(data, draft)?;
            Ok((format!("Championship {id} added"), DataKind::History))
        }
        FormKind::EditChampionship(id) => {
            let draft = ChampionshipDraft::parse(f("Year"), f("Winning Team"), f("Final Score"))?;
            admin::update_championship(data, id, draft)?;
            Ok((format!("Championship {id} updated"), DataKind::History))
        }
        FormKind::AddAward => {
            let player_id = f("Player").parse::<PlayerId>().ok();
            let draft = AwardDraft::parse(f("Year"), f("Award"), player_id, f("Team"))?;
            let id = admin::add_award(data, draft)?;
            Ok((format!("Award {id} added"), DataKind::History))
        }
        FormKind::EditAward(id) => {
            admin::update_award(
                data,
                id,
                f("Year"),
                f("Award"),
                f("Player"),
                f("Description"),
            )?;
            Ok((format!("Award {id} updated"), DataKind::History))
        }
        FormKind::AddRecord => {
            let draft = RecordDraft::parse(
                f("Year"),
                f("Record Name"),
                f("Record Value"),
                f("Player"),
            )?;
            let id = admin::add_record(data, draft)?;
            Ok((format!("Record {id} added"), DataKind::History))
        }
        FormKind::EditRecord(id) => {
            let draft = RecordDraft::parse(
                f("Year"),
                f("Record Name"),
                f("Record Value"),
                f("Player"),
            )?;
            admin::update_record(data, id, draft)?;
            Ok((format!("Record {id} updated"), DataKind::History))
        }
    }
}
