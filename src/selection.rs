//! Two-column player picker used by the team editor.
//!
//! Items live in exactly one of two ordered lists, `available` or `selected`.
//! A comma-joined mirror of the selected ids is recomputed after every
//! mutation, and an optional pinned id (the captain) is forced back into the
//! selected list whenever a move would take it out.
//!
//! Ids that are not part of the session are ignored: every operation that
//! receives one returns without touching state.

use std::collections::HashSet;

use tracing::debug;

use crate::error::SelectionError;
use crate::model::{Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    pub id: PlayerId,
    pub name: String,
    pub category: String,
}

impl From<&Player> for SelectionItem {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            category: player.position.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Available,
    Selected,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Available => Side::Selected,
            Side::Selected => Side::Available,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    ToSelected,
    ToAvailable,
}

impl MoveDirection {
    pub fn source(self) -> Side {
        match self {
            MoveDirection::ToSelected => Side::Available,
            MoveDirection::ToAvailable => Side::Selected,
        }
    }

    /// Direction that takes an item away from `side`.
    pub fn away_from(side: Side) -> Self {
        match side {
            Side::Available => MoveDirection::ToSelected,
            Side::Selected => MoveDirection::ToAvailable,
        }
    }
}

#[derive(Debug, Clone)]
struct Chip {
    item: SelectionItem,
    marked: bool,
    selected: bool,
}

impl Chip {
    fn new(item: SelectionItem, selected: bool) -> Self {
        Self {
            item,
            marked: false,
            selected,
        }
    }

    fn land(&mut self, direction: MoveDirection) {
        self.marked = false;
        self.selected = direction == MoveDirection::ToSelected;
    }
}

/// Render projection of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipView<'a> {
    pub item: &'a SelectionItem,
    pub marked: bool,
    pub selected: bool,
    pub pinned: bool,
}

#[derive(Debug, Clone)]
pub struct DualListSelector {
    available: Vec<Chip>,
    selected: Vec<Chip>,
    pinned: Option<PlayerId>,
    serialized: String,
}

impl DualListSelector {
    /// Seeds a session. Fails if an id repeats or appears on both sides.
    pub fn new(
        available: Vec<SelectionItem>,
        selected: Vec<SelectionItem>,
        pinned: Option<PlayerId>,
    ) -> Result<Self, SelectionError> {
        let mut selected_ids = HashSet::with_capacity(selected.len());
        for item in &selected {
            if !selected_ids.insert(item.id) {
                return Err(SelectionError::Duplicate(item.id));
            }
        }
        let mut available_ids = HashSet::with_capacity(available.len());
        for item in &available {
            if selected_ids.contains(&item.id) {
                return Err(SelectionError::Overlap(item.id));
            }
            if !available_ids.insert(item.id) {
                return Err(SelectionError::Duplicate(item.id));
            }
        }

        let mut selector = Self {
            available: available
                .into_iter()
                .map(|item| Chip::new(item, false))
                .collect(),
            selected: selected
                .into_iter()
                .map(|item| Chip::new(item, true))
                .collect(),
            pinned,
            serialized: String::new(),
        };
        selector.sync_serialized();
        if let Some(id) = pinned {
            selector.repin_captain(id);
        }
        Ok(selector)
    }

    /// Flips the staging mark of an item in either list.
    pub fn toggle_mark(&mut self, id: PlayerId) -> bool {
        match self.chip_mut(id) {
            Some(chip) => {
                chip.marked = !chip.marked;
                true
            }
            None => {
                debug!(id, "toggle_mark ignored unknown id");
                false
            }
        }
    }

    /// Moves every marked item of the source list to the end of the
    /// destination, keeping their relative order. Returns how many moved.
    pub fn move_marked(&mut self, direction: MoveDirection) -> usize {
        let (source, destination) = self.lists_mut(direction);
        if !source.iter().any(|chip| chip.marked) {
            return 0;
        }

        let (mut moving, kept): (Vec<Chip>, Vec<Chip>) =
            std::mem::take(source).into_iter().partition(|chip| chip.marked);
        *source = kept;
        let moved = moving.len();
        for chip in &mut moving {
            chip.land(direction);
        }
        destination.extend(moving);

        self.settle(direction);
        moved
    }

    /// Moves one item out of the source list regardless of its mark.
    pub fn move_single(&mut self, id: PlayerId, direction: MoveDirection) -> bool {
        let (source, destination) = self.lists_mut(direction);
        let Some(idx) = source.iter().position(|chip| chip.item.id == id) else {
            debug!(id, ?direction, "move_single ignored id not in source list");
            return false;
        };

        let mut chip = source.remove(idx);
        chip.land(direction);
        destination.push(chip);

        self.settle(direction);
        true
    }

    /// Ensures `id` sits in the selected list, appending it if it was available.
    /// Returns whether anything moved.
    pub fn repin_captain(&mut self, id: PlayerId) -> bool {
        if self.selected.iter().any(|chip| chip.item.id == id) {
            return false;
        }
        let Some(idx) = self.available.iter().position(|chip| chip.item.id == id) else {
            debug!(id, "repin_captain found the id in neither list");
            return false;
        };

        let mut chip = self.available.remove(idx);
        chip.land(MoveDirection::ToSelected);
        self.selected.push(chip);
        self.sync_serialized();
        true
    }

    /// Makes `id` the captain and pulls it into the selected list. The
    /// previous captain stays where it is.
    pub fn change_pinned(&mut self, id: PlayerId) -> bool {
        if self.side_of(id).is_none() {
            debug!(id, "change_pinned ignored unknown id");
            return false;
        }
        self.pinned = Some(id);
        self.repin_captain(id);
        true
    }

    pub fn serialized_selection(&self) -> &str {
        &self.serialized
    }

    pub fn selected_ids(&self) -> Vec<PlayerId> {
        parse_selection(&self.serialized)
    }

    pub fn pinned(&self) -> Option<PlayerId> {
        self.pinned
    }

    pub fn len(&self, side: Side) -> usize {
        self.list(side).len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.selected.is_empty()
    }

    pub fn side_of(&self, id: PlayerId) -> Option<Side> {
        if self.available.iter().any(|chip| chip.item.id == id) {
            Some(Side::Available)
        } else if self.selected.iter().any(|chip| chip.item.id == id) {
            Some(Side::Selected)
        } else {
            None
        }
    }

    pub fn is_marked(&self, id: PlayerId) -> bool {
        self.available
            .iter()
            .chain(self.selected.iter())
            .any(|chip| chip.item.id == id && chip.marked)
    }

    pub fn chips(&self, side: Side) -> impl Iterator<Item = ChipView<'_>> {
        self.list(side).iter().map(move |chip| self.view(chip))
    }

    pub fn chip_at(&self, side: Side, idx: usize) -> Option<ChipView<'_>> {
        self.list(side).get(idx).map(|chip| self.view(chip))
    }

    pub fn ids(&self, side: Side) -> Vec<PlayerId> {
        self.list(side).iter().map(|chip| chip.item.id).collect()
    }

    fn view<'a>(&self, chip: &'a Chip) -> ChipView<'a> {
        ChipView {
            item: &chip.item,
            marked: chip.marked,
            selected: chip.selected,
            pinned: self.pinned == Some(chip.item.id),
        }
    }

    fn list(&self, side: Side) -> &[Chip] {
        match side {
            Side::Available => &self.available,
            Side::Selected => &self.selected,
        }
    }

    fn lists_mut(&mut self, direction: MoveDirection) -> (&mut Vec<Chip>, &mut Vec<Chip>) {
        match direction {
            MoveDirection::ToSelected => (&mut self.available, &mut self.selected),
            MoveDirection::ToAvailable => (&mut self.selected, &mut self.available),
        }
    }

    fn chip_mut(&mut self, id: PlayerId) -> Option<&mut Chip> {
        self.available
            .iter_mut()
            .chain(self.selected.iter_mut())
            .find(|chip| chip.item.id == id)
    }

    // The captain snaps back after anything leaves the selected list.
    fn settle(&mut self, direction: MoveDirection) {
        if direction == MoveDirection::ToAvailable {
            if let Some(id) = self.pinned {
                self.repin_captain(id);
            }
        }
        self.sync_serialized();
    }

    fn sync_serialized(&mut self) {
        self.serialized = serialize_selection(self.selected.iter().map(|chip| chip.item.id));
    }
}

pub fn serialize_selection(ids: impl IntoIterator<Item = PlayerId>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Inverse of [`serialize_selection`]. Blank input is an empty selection and
/// fragments that are not ids are skipped.
pub fn parse_selection(raw: &str) -> Vec<PlayerId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split(',')
        .filter_map(|part| part.trim().parse::<PlayerId>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: PlayerId) -> SelectionItem {
        SelectionItem {
            id,
            name: format!("Player {id}"),
            category: "WR".to_string(),
        }
    }

    fn items(ids: &[PlayerId]) -> Vec<SelectionItem> {
        ids.iter().copied().map(item).collect()
    }

    const A: PlayerId = 1;
    const B: PlayerId = 2;
    const C: PlayerId = 3;

    #[test]
    fn pinned_item_is_pulled_in_on_init() {
        let sel = DualListSelector::new(items(&[A, B, C]), Vec::new(), Some(A)).unwrap();
        assert_eq!(sel.ids(Side::Selected), vec![A]);
        assert_eq!(sel.ids(Side::Available), vec![B, C]);
        assert_eq!(sel.serialized_selection(), "1");
    }

    #[test]
    fn walkthrough_of_a_captain_session() {
        let mut sel = DualListSelector::new(items(&[A, B, C]), Vec::new(), Some(A)).unwrap();

        assert!(sel.toggle_mark(B));
        assert!(sel.toggle_mark(C));
        assert_eq!(sel.move_marked(MoveDirection::ToSelected), 2);
        assert_eq!(sel.ids(Side::Selected), vec![A, B, C]);
        assert_eq!(sel.serialized_selection(), "1,2,3");
        assert!(sel.ids(Side::Available).is_empty());

        sel.toggle_mark(A);
        assert_eq!(sel.move_marked(MoveDirection::ToAvailable), 1);
        assert_eq!(sel.ids(Side::Selected), vec![B, C, A]);
        assert_eq!(sel.serialized_selection(), "2,3,1");
        assert!(sel.ids(Side::Available).is_empty());
        assert!(!sel.is_marked(A));
    }

    #[test]
    fn change_pinned_pulls_new_captain_and_keeps_old_one() {
        let mut sel = DualListSelector::new(items(&[A, B, C]), Vec::new(), Some(A)).unwrap();
        assert!(sel.change_pinned(B));
        assert_eq!(sel.pinned(), Some(B));
        assert_eq!(sel.ids(Side::Selected), vec![A, B]);
        assert_eq!(sel.serialized_selection(), "1,2");
    }

    #[test]
    fn move_single_drops_a_non_captain() {
        let mut sel = DualListSelector::new(Vec::new(), items(&[A, B, C]), Some(A)).unwrap();
        sel.toggle_mark(C);
        assert!(sel.move_single(C, MoveDirection::ToAvailable));
        assert_eq!(sel.ids(Side::Selected), vec![A, B]);
        assert_eq!(sel.ids(Side::Available), vec![C]);
        assert_eq!(sel.serialized_selection(), "1,2");
        assert!(!sel.is_marked(C));
    }

    #[test]
    fn move_single_snaps_captain_back() {
        let mut sel = DualListSelector::new(Vec::new(), items(&[A, B]), Some(A)).unwrap();
        assert!(sel.move_single(A, MoveDirection::ToAvailable));
        assert_eq!(sel.ids(Side::Selected), vec![B, A]);
        assert!(sel.ids(Side::Available).is_empty());
    }

    #[test]
    fn unknown_ids_leave_state_untouched() {
        let mut sel = DualListSelector::new(items(&[A]), items(&[B]), None).unwrap();
        assert!(!sel.toggle_mark(99));
        assert!(!sel.move_single(99, MoveDirection::ToSelected));
        assert!(!sel.move_single(B, MoveDirection::ToSelected));
        assert!(!sel.repin_captain(99));
        assert!(!sel.change_pinned(99));
        assert_eq!(sel.pinned(), None);
        assert_eq!(sel.ids(Side::Available), vec![A]);
        assert_eq!(sel.serialized_selection(), "2");
    }

    #[test]
    fn init_rejects_overlap_and_duplicates() {
        assert_eq!(
            DualListSelector::new(items(&[A, B]), items(&[B]), None).unwrap_err(),
            SelectionError::Overlap(B)
        );
        assert_eq!(
            DualListSelector::new(items(&[A, A]), Vec::new(), None).unwrap_err(),
            SelectionError::Duplicate(A)
        );
        assert_eq!(
            DualListSelector::new(Vec::new(), items(&[C, C]), None).unwrap_err(),
            SelectionError::Duplicate(C)
        );
    }

    #[test]
    fn parse_selection_skips_garbage() {
        assert_eq!(parse_selection(""), Vec::<PlayerId>::new());
        assert_eq!(parse_selection("   "), Vec::<PlayerId>::new());
        assert_eq!(parse_selection("4, 7,x,9"), vec![4, 7, 9]);
    }

    #[test]
    fn render_flags_follow_the_list() {
        let mut sel = DualListSelector::new(items(&[A, B]), Vec::new(), Some(B)).unwrap();
        sel.toggle_mark(A);
        let available: Vec<_> = sel.chips(Side::Available).collect();
        assert_eq!(available.len(), 1);
        assert!(available[0].marked);
        assert!(!available[0].selected);

        let captain = sel.chip_at(Side::Selected, 0).unwrap();
        assert!(captain.selected);
        assert!(captain.pinned);
    }
}
