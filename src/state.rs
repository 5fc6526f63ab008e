use std::collections::VecDeque;
use std::path::PathBuf;

use crate::admin::{self, AdminUnlock};
use crate::editor::TeamEditor;
use crate::error::AdminResult;
use crate::forms::{self, FormState};
use crate::model::{HistoryKind, Player, PlayerId, Team, TeamId, TournamentData};
use crate::seed::AWARD_NAMES;
use crate::store::DataKind;
use crate::transfer;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Roster,
    Teams,
    History,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Home, Screen::Roster, Screen::Teams, Screen::History];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Roster => "Roster",
            Screen::Teams => "Teams",
            Screen::History => "History",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    AdminPassword,
    ExportPath,
    ImportPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::AdminPassword => "Enter admin password",
            PromptKind::ExportPath => "Export to file or directory",
            PromptKind::ImportPath => "Import from file",
        }
    }

    pub fn masked(&self) -> bool {
        self.kind == PromptKind::AdminPassword
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeletePlayer(PlayerId),
    DeleteTeam(TeamId),
    RemoveFromTeam { team: TeamId, player: PlayerId },
    DeleteHistory(HistoryKind, u32),
    Import(PathBuf),
    Reset,
}

impl ConfirmAction {
    pub fn question(&self, data: &TournamentData) -> String {
        match self {
            ConfirmAction::DeletePlayer(id) => format!(
                "Delete {}?",
                data.player_name(*id).unwrap_or("this player")
            ),
            ConfirmAction::DeleteTeam(id) => format!(
                "Delete team {}?",
                data.team(*id).map(|t| t.name.as_str()).unwrap_or("?")
            ),
            ConfirmAction::RemoveFromTeam { .. } => "Remove this player from the team?".to_string(),
            ConfirmAction::DeleteHistory(..) => "Delete this item?".to_string(),
            ConfirmAction::Import(_) => "Import data? This will overwrite current data.".to_string(),
            ConfirmAction::Reset => "Reset all data to defaults? This cannot be undone.".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Modal {
    Form(FormState),
    TeamEditor(TeamEditor),
    Prompt(Prompt),
    Confirm(ConfirmAction),
}

/// Result of a state change the caller has to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Persist(Vec<DataKind>),
    /// Drop saved files and reload the built-in data.
    Reset,
}

pub struct AppState {
    pub data: TournamentData,
    pub screen: Screen,
    pub selected: usize,
    pub member_selected: usize,
    pub history_section: HistoryKind,
    pub admin_mode: bool,
    pub help_overlay: bool,
    pub modal: Option<Modal>,
    pub logs: VecDeque<String>,
    unlock: AdminUnlock,
}

impl AppState {
    pub fn new(data: TournamentData, admin_keyword: &str) -> Self {
        Self {
            data,
            screen: Screen::Home,
            selected: 0,
            member_selected: 0,
            history_section: HistoryKind::Championships,
            admin_mode: false,
            help_overlay: false,
            modal: None,
            logs: VecDeque::with_capacity(MAX_LOGS),
            unlock: AdminUnlock::new(admin_keyword),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn last_log(&self) -> Option<&str> {
        self.logs.back().map(String::as_str)
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen != screen {
            self.screen = screen;
            self.selected = 0;
            self.member_selected = 0;
        }
    }

    pub fn list_len(&self) -> usize {
        match self.screen {
            Screen::Home => 0,
            Screen::Roster => self.data.players.len(),
            Screen::Teams => self.data.teams.len(),
            Screen::History => self.data.history.len_of(self.history_section),
        }
    }

    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
            self.member_selected = 0;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.member_selected = 0;
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        self.selected = self.selected.min(len.saturating_sub(1));
        let members = self.selected_team().map(|t| t.players.len()).unwrap_or(0);
        self.member_selected = self.member_selected.min(members.saturating_sub(1));
    }

    pub fn select_member_next(&mut self) {
        let members = self.selected_team().map(|t| t.players.len()).unwrap_or(0);
        if members > 0 && self.member_selected + 1 < members {
            self.member_selected += 1;
        }
    }

    pub fn select_member_prev(&mut self) {
        self.member_selected = self.member_selected.saturating_sub(1);
    }

    pub fn cycle_history_section(&mut self) {
        self.history_section = self.history_section.next();
        self.selected = 0;
    }

    pub fn selected_player(&self) -> Option<&Player> {
        match self.screen {
            Screen::Roster => self.data.players.get(self.selected),
            _ => None,
        }
    }

    pub fn selected_team(&self) -> Option<&Team> {
        match self.screen {
            Screen::Teams => self.data.teams.get(self.selected),
            _ => None,
        }
    }

    pub fn selected_member(&self) -> Option<PlayerId> {
        self.selected_team()
            .and_then(|t| t.players.get(self.member_selected).copied())
    }

    pub fn selected_history_id(&self) -> Option<u32> {
        match self.screen {
            Screen::History => self.data.history.id_at(self.history_section, self.selected),
            _ => None,
        }
    }

    /// Feeds a typed character to the unlock sequence; opens the password
    /// prompt when it completes.
    pub fn feed_unlock(&mut self, c: char) -> bool {
        if self.admin_mode || self.modal.is_some() {
            return false;
        }
        if self.unlock.push(c) {
            self.modal = Some(Modal::Prompt(Prompt::new(PromptKind::AdminPassword)));
            return true;
        }
        false
    }

    pub fn enter_admin(&mut self, password: &str) -> AdminResult<()> {
        admin::check_password(&self.data.settings, password)?;
        self.admin_mode = true;
        self.push_log("[INFO] Admin mode activated");
        Ok(())
    }

    pub fn exit_admin(&mut self) {
        self.admin_mode = false;
        self.modal = None;
        self.push_log("[INFO] Admin mode deactivated");
    }

    pub fn open_modal(&mut self, modal: Modal) {
        if self.admin_mode {
            self.modal = Some(modal);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// `a` on the current screen.
    pub fn open_add(&mut self) -> AdminResult<()> {
        let modal = match self.screen {
            Screen::Home => return Ok(()),
            Screen::Roster => Modal::Form(forms::add_player_form()),
            Screen::Teams => Modal::TeamEditor(TeamEditor::create(&self.data)?),
            Screen::History => Modal::Form(match self.history_section {
                HistoryKind::Championships => forms::add_championship_form(&self.data),
                HistoryKind::Awards => forms::add_award_form(&self.data, AWARD_NAMES[0]),
                HistoryKind::Records => forms::add_record_form(&self.data),
            }),
        };
        self.open_modal(modal);
        Ok(())
    }

    /// `e` on the current screen.
    pub fn open_edit(&mut self) -> AdminResult<()> {
        let modal = match self.screen {
            Screen::Home => return Ok(()),
            Screen::Roster => match self.selected_player() {
                Some(p) => Modal::Form(forms::edit_player_form(&self.data, p.id)?),
                None => return Ok(()),
            },
            Screen::Teams => match self.selected_team() {
                Some(t) => Modal::Form(forms::rename_team_form(&self.data, t.id)?),
                None => return Ok(()),
            },
            Screen::History => match self.selected_history_id() {
                Some(id) => Modal::Form(forms::edit_history_form(
                    &self.data,
                    self.history_section,
                    id,
                )?),
                None => return Ok(()),
            },
        };
        self.open_modal(modal);
        Ok(())
    }

    pub fn open_roster_editor(&mut self) -> AdminResult<()> {
        let Some(team_id) = self.selected_team().map(|t| t.id) else {
            return Ok(());
        };
        let editor = TeamEditor::edit(&self.data, team_id)?;
        self.open_modal(Modal::TeamEditor(editor));
        Ok(())
    }

    /// `D` on the current screen asks for confirmation first.
    pub fn request_delete(&mut self) {
        let action = match self.screen {
            Screen::Home => None,
            Screen::Roster => self.selected_player().map(|p| ConfirmAction::DeletePlayer(p.id)),
            Screen::Teams => self.selected_team().map(|t| ConfirmAction::DeleteTeam(t.id)),
            Screen::History => self
                .selected_history_id()
                .map(|id| ConfirmAction::DeleteHistory(self.history_section, id)),
        };
        if let Some(action) = action {
            self.open_modal(Modal::Confirm(action));
        }
    }

    pub fn request_member_removal(&mut self) {
        let team = self.selected_team().map(|t| t.id);
        if let (Some(team), Some(player)) = (team, self.selected_member()) {
            self.open_modal(Modal::Confirm(ConfirmAction::RemoveFromTeam { team, player }));
        }
    }

    pub fn toggle_selected_current_year(&mut self) -> AdminResult<Effect> {
        let Some(id) = self.selected_player().map(|p| p.id) else {
            return Ok(Effect::None);
        };
        let now = admin::toggle_current_year(&mut self.data, id)?;
        self.push_log(format!(
            "[INFO] Player {id} {} this year",
            if now { "playing" } else { "sitting out" }
        ));
        Ok(Effect::Persist(vec![DataKind::Players]))
    }

    /// Submits whatever form or editor is open. On error the modal stays
    /// open so the user can fix the input.
    pub fn submit_modal(&mut self) -> AdminResult<Effect> {
        let effect = match &self.modal {
            Some(Modal::Form(form)) => {
                let (msg, kind) = forms::submit(form, &mut self.data)?;
                self.push_log(format!("[INFO] {msg}"));
                Effect::Persist(vec![kind])
            }
            Some(Modal::TeamEditor(editor)) => {
                let id = editor.submit(&mut self.data)?;
                self.push_log(format!("[INFO] Team {id} saved"));
                Effect::Persist(vec![DataKind::Teams])
            }
            Some(Modal::Prompt(prompt)) => {
                let prompt = prompt.clone();
                return self.submit_prompt(prompt);
            }
            Some(Modal::Confirm(action)) => {
                let action = action.clone();
                self.modal = None;
                let effect = self.confirm(action)?;
                self.clamp_selection();
                return Ok(effect);
            }
            None => return Ok(Effect::None),
        };
        self.modal = None;
        self.clamp_selection();
        Ok(effect)
    }

    fn submit_prompt(&mut self, prompt: Prompt) -> AdminResult<Effect> {
        self.modal = None;
        match prompt.kind {
            PromptKind::AdminPassword => {
                if let Err(err) = self.enter_admin(&prompt.input) {
                    self.push_log("[WARN] Incorrect password!");
                    return Err(err);
                }
                Ok(Effect::None)
            }
            PromptKind::ExportPath => {
                let path = prompt_path(&prompt.input);
                match transfer::export_to(&path, &self.data) {
                    Ok(written) => self.push_log(format!("[INFO] Data exported to {}", written.display())),
                    Err(err) => self.push_log(format!("[WARN] Export failed: {err:#}")),
                }
                Ok(Effect::None)
            }
            PromptKind::ImportPath => {
                let path = prompt_path(&prompt.input);
                self.open_modal(Modal::Confirm(ConfirmAction::Import(path)));
                Ok(Effect::None)
            }
        }
    }

    pub fn confirm(&mut self, action: ConfirmAction) -> AdminResult<Effect> {
        match action {
            ConfirmAction::DeletePlayer(id) => {
                admin::delete_player(&mut self.data, id)?;
                self.push_log(format!("[INFO] Player {id} deleted"));
                Ok(Effect::Persist(vec![DataKind::Players, DataKind::Teams]))
            }
            ConfirmAction::DeleteTeam(id) => {
                admin::delete_team(&mut self.data, id)?;
                self.push_log(format!("[INFO] Team {id} deleted"));
                Ok(Effect::Persist(vec![DataKind::Teams]))
            }
            ConfirmAction::RemoveFromTeam { team, player } => {
                admin::remove_from_team(&mut self.data, team, player)?;
                self.push_log(format!("[INFO] Player {player} removed from team {team}"));
                Ok(Effect::Persist(vec![DataKind::Teams]))
            }
            ConfirmAction::DeleteHistory(kind, id) => {
                admin::delete_history_item(&mut self.data, kind, id)?;
                self.push_log(format!("[INFO] {kind} {id} deleted"));
                Ok(Effect::Persist(vec![DataKind::History]))
            }
            ConfirmAction::Import(path) => match transfer::import_from(&path, &mut self.data) {
                Ok(kinds) => {
                    self.push_log("[INFO] Data imported successfully!");
                    Ok(Effect::Persist(kinds))
                }
                Err(err) => {
                    self.push_log(format!("[WARN] Error importing data: {err:#}"));
                    Ok(Effect::None)
                }
            },
            ConfirmAction::Reset => {
                self.push_log("[INFO] Data reset to defaults!");
                Ok(Effect::Reset)
            }
        }
    }

    /// Replaces the dataset, e.g. after a reset, keeping the cursor in range.
    pub fn replace_data(&mut self, data: TournamentData) {
        self.data = data;
        self.clamp_selection();
    }
}

fn prompt_path(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(trimmed)
    }
}
