use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{ComponentKind, EditOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub kind: ComponentKind,
    pub count: u8,
}

/// Pieces the player can still place, plus which slot is selected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: SmallVec<[InventoryItem; 4]>,
    selected: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = 0;
    }

    pub fn push(&mut self, kind: ComponentKind, count: u8) {
        self.items.push(InventoryItem { kind, count });
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&InventoryItem> {
        self.items.get(self.selected)
    }

    pub fn count_of(&self, kind: ComponentKind) -> u8 {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .map(|item| item.count)
            .sum()
    }

    /// Moves the selection to the next slot, wrapping to the first.
    pub fn select_next(&mut self) -> EditOutcome {
        if self.items.is_empty() {
            return EditOutcome::NoChange;
        }

        let next = (self.selected + 1) % self.items.len();
        if next == self.selected {
            EditOutcome::NoChange
        } else {
            self.selected = next;
            EditOutcome::Changed
        }
    }

    /// Takes one piece from the selected slot, if it has any left.
    pub(crate) fn take_selected(&mut self) -> Option<ComponentKind> {
        let item = self.items.get_mut(self.selected)?;
        if item.count == 0 {
            return None;
        }
        item.count -= 1;
        Some(item.kind)
    }

    /// Returns a piece to the first slot holding the same kind.
    ///
    /// Returns `false` when no slot matches, in which case the piece is dropped.
    pub(crate) fn give_back(&mut self, kind: ComponentKind) -> bool {
        match self.items.iter_mut().find(|item| item.kind == kind) {
            Some(item) => {
                item.count = item.count.saturating_add(1);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComponentKind::*;

    fn starter() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.push(Wire, 4);
        inventory.push(Resistor, 1);
        inventory.push(Led, 1);
        inventory
    }

    #[test]
    fn select_next_wraps_to_first_slot() {
        let mut inventory = starter();
        let len = inventory.items().len();

        for expected in (1..len).chain([0]) {
            assert_eq!(inventory.select_next(), EditOutcome::Changed);
            assert_eq!(inventory.selected_index(), expected);
        }
    }

    #[test]
    fn select_next_on_empty_inventory_is_noop() {
        let mut inventory = Inventory::new();
        assert_eq!(inventory.select_next(), EditOutcome::NoChange);
        assert_eq!(inventory.selected_index(), 0);
        assert!(inventory.selected().is_none());
    }

    #[test]
    fn select_next_with_single_slot_is_noop() {
        let mut inventory = Inventory::new();
        inventory.push(Wire, 2);

        assert_eq!(inventory.select_next(), EditOutcome::NoChange);
        assert_eq!(inventory.selected_index(), 0);
    }

    #[test]
    fn take_selected_stops_at_zero() {
        let mut inventory = starter();
        inventory.select_next();

        assert_eq!(inventory.take_selected(), Some(Resistor));
        assert_eq!(inventory.take_selected(), None);
        assert_eq!(inventory.count_of(Resistor), 0);
    }

    #[test]
    fn give_back_merges_by_kind() {
        let mut inventory = starter();
        inventory.select_next();
        inventory.select_next();

        assert!(inventory.give_back(Wire));
        assert_eq!(inventory.count_of(Wire), 5);
        assert!(!inventory.give_back(Battery));
        assert_eq!(inventory.count_of(Battery), 0);
    }
}
