use serde::{Deserialize, Serialize};

use crate::models::champion::Champion;
use crate::models::draft_format::{ActionKind, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRef {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub side: Side,
    pub index: usize,
}

impl SlotRef {
    pub fn new(kind: ActionKind, side: Side, index: usize) -> Self {
        SlotRef { kind, side, index }
    }
}

/// Pick and ban rows for both sides, stored as one table of
/// `(kind, side, index)` slots, `capacity` slots per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    capacity: usize,
    slots: Vec<Option<Champion>>,
}

impl Board {
    pub fn new(capacity: usize) -> Self {
        Board {
            capacity,
            slots: vec![None; capacity * 4],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn offset(&self, kind: ActionKind, side: Side) -> usize {
        (kind.index() * 2 + side.index()) * self.capacity
    }

    pub fn row(&self, kind: ActionKind, side: Side) -> &[Option<Champion>] {
        let start = self.offset(kind, side);
        &self.slots[start..start + self.capacity]
    }

    fn row_mut(&mut self, kind: ActionKind, side: Side) -> &mut [Option<Champion>] {
        let start = self.offset(kind, side);
        let capacity = self.capacity;
        &mut self.slots[start..start + capacity]
    }

    pub fn next_free_index(&self, kind: ActionKind, side: Side) -> Option<usize> {
        self.row(kind, side).iter().position(|slot| slot.is_none())
    }

    pub fn last_filled_index(&self, kind: ActionKind, side: Side) -> Option<usize> {
        self.row(kind, side).iter().rposition(|slot| slot.is_some())
    }

    /// Returns false when the slot is outside the row.
    pub fn place(&mut self, slot: SlotRef, champion: Champion) -> bool {
        match self.row_mut(slot.kind, slot.side).get_mut(slot.index) {
            Some(cell) => {
                *cell = Some(champion);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, slot: SlotRef) -> Option<Champion> {
        self.row_mut(slot.kind, slot.side)
            .get_mut(slot.index)
            .and_then(Option::take)
    }

    pub fn champions(&self) -> impl Iterator<Item = &Champion> {
        self.slots.iter().flatten()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
