use crate::admin::{self, TeamDraft};
use crate::error::{AdminError, AdminResult};
use crate::model::{PlayerId, TeamId, TournamentData};
use crate::selection::{DualListSelector, MoveDirection, SelectionItem, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(TeamId),
}

/// One open "add team" or "edit roster" session.
#[derive(Debug, Clone)]
pub struct TeamEditor {
    pub mode: EditorMode,
    pub name: String,
    pub editing_name: bool,
    candidates: Vec<PlayerId>,
    selector: DualListSelector,
    focus: Side,
    cursor: usize,
}

impl TeamEditor {
    /// Every current-year player starts out available and nobody is captain.
    pub fn create(data: &TournamentData) -> AdminResult<Self> {
        let pool: Vec<SelectionItem> = data.current_players().map(SelectionItem::from).collect();
        let candidates = pool.iter().map(|item| item.id).collect();
        Ok(Self {
            mode: EditorMode::Create,
            name: String::new(),
            editing_name: true,
            candidates,
            selector: DualListSelector::new(pool, Vec::new(), None)?,
            focus: Side::Available,
            cursor: 0,
        })
    }

    /// Splits the current-year players by roster membership, keeping roster
    /// order of the player list, and pins the team's captain.
    pub fn edit(data: &TournamentData, team_id: TeamId) -> AdminResult<Self> {
        let team = data.team(team_id).ok_or(AdminError::UnknownTeam(team_id))?;
        let (selected, available): (Vec<SelectionItem>, Vec<SelectionItem>) = data
            .current_players()
            .map(SelectionItem::from)
            .partition(|item| team.players.contains(&item.id));
        let candidates = data.current_players().map(|p| p.id).collect();
        Ok(Self {
            mode: EditorMode::Edit(team_id),
            name: team.name.clone(),
            editing_name: false,
            candidates,
            selector: DualListSelector::new(available, selected, Some(team.captain_id))?,
            focus: Side::Selected,
            cursor: 0,
        })
    }

    pub fn selector(&self) -> &DualListSelector {
        &self.selector
    }

    pub fn focus(&self) -> Side {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn captain(&self) -> Option<PlayerId> {
        self.selector.pinned()
    }

    pub fn switch_focus(&mut self) {
        self.focus = self.focus.other();
        self.clamp_cursor();
    }

    pub fn cursor_next(&mut self) {
        let len = self.selector.len(self.focus);
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        let len = self.selector.len(self.focus);
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn id_under_cursor(&self) -> Option<PlayerId> {
        self.selector
            .chip_at(self.focus, self.cursor)
            .map(|chip| chip.item.id)
    }

    pub fn toggle_mark(&mut self) -> bool {
        match self.id_under_cursor() {
            Some(id) => self.selector.toggle_mark(id),
            None => false,
        }
    }

    /// Double-click equivalent: sends the focused item to the other column.
    pub fn move_under_cursor(&mut self) -> bool {
        let Some(id) = self.id_under_cursor() else {
            return false;
        };
        let moved = self
            .selector
            .move_single(id, MoveDirection::away_from(self.focus));
        self.clamp_cursor();
        moved
    }

    pub fn move_marked(&mut self, direction: MoveDirection) -> usize {
        let moved = self.selector.move_marked(direction);
        self.clamp_cursor();
        moved
    }

    /// Hands the captaincy to the next current-year player.
    pub fn cycle_captain(&mut self) -> Option<PlayerId> {
        if self.candidates.is_empty() {
            return None;
        }
        let next = match self
            .captain()
            .and_then(|id| self.candidates.iter().position(|c| *c == id))
        {
            Some(idx) => self.candidates[(idx + 1) % self.candidates.len()],
            None => self.candidates[0],
        };
        self.selector.change_pinned(next);
        self.clamp_cursor();
        Some(next)
    }

    pub fn draft(&self) -> TeamDraft {
        TeamDraft::parse(
            &self.name,
            self.captain(),
            self.selector.serialized_selection(),
        )
    }

    pub fn submit(&self, data: &mut TournamentData) -> AdminResult<TeamId> {
        match self.mode {
            EditorMode::Create => admin::add_team(data, self.draft()),
            EditorMode::Edit(team_id) => {
                admin::update_roster(data, team_id, self.draft())?;
                Ok(team_id)
            }
        }
    }
}
