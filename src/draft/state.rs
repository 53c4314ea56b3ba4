use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::board::{Board, SlotRef};
use super::timeline::TurnAction;
use crate::models::champion::Champion;
use crate::models::draft_format::{ActionKind, Side};

pub const DEFAULT_SLOT_CAPACITY: usize = 5;

/// Board, cursor and preferences of one draft.
///
/// `history` holds the slot filled by each resolved turn, so
/// `history.len() == cursor` and undo never has to infer which slot a turn
/// wrote to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    our_side: Side,
    board: Board,
    cursor: usize,
    is_first_pick: bool,
    history: Vec<SlotRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStatus {
    pub cursor: usize,
    pub total: usize,
    pub current_action: Option<TurnAction>,
    pub target_slot: Option<SlotRef>,
    pub is_our_turn: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRows {
    pub blue: Vec<Option<String>>,
    pub red: Vec<Option<String>>,
}

/// Champion ids per row, in the `{picks: {blue, red}, bans: {blue, red}}`
/// shape the recommendation backend expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub our_side: Side,
    pub cursor: usize,
    pub is_first_pick: bool,
    pub picks: SideRows,
    pub bans: SideRows,
}

impl DraftSnapshot {
    pub fn taken_champion_ids(&self) -> HashSet<String> {
        [&self.picks, &self.bans]
            .iter()
            .flat_map(|rows| rows.blue.iter().chain(rows.red.iter()))
            .flatten()
            .cloned()
            .collect()
    }
}

impl DraftState {
    pub fn new(our_side: Side, capacity: usize) -> Self {
        DraftState {
            our_side,
            board: Board::new(capacity),
            cursor: 0,
            is_first_pick: true,
            history: Vec::new(),
        }
    }

    pub fn our_side(&self) -> Side {
        self.our_side
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_first_pick(&self) -> bool {
        self.is_first_pick
    }

    pub fn current_action(&self, timeline: &[TurnAction]) -> Option<TurnAction> {
        timeline.get(self.cursor).copied()
    }

    /// The lowest empty slot of the current action's row. None when the
    /// draft is complete or the row is already full.
    pub fn target_slot(&self, timeline: &[TurnAction]) -> Option<SlotRef> {
        let action = self.current_action(timeline)?;
        let index = self.board.next_free_index(action.kind, action.side)?;
        Some(SlotRef::new(action.kind, action.side, index))
    }

    pub fn is_our_turn(&self, timeline: &[TurnAction]) -> bool {
        self.current_action(timeline)
            .map_or(false, |action| action.side == self.our_side)
    }

    pub fn taken_champion_ids(&self) -> HashSet<String> {
        self.board.champions().map(|c| c.id.clone()).collect()
    }

    pub fn status(&self, timeline: &[TurnAction]) -> DraftStatus {
        DraftStatus {
            cursor: self.cursor,
            total: timeline.len(),
            current_action: self.current_action(timeline),
            target_slot: self.target_slot(timeline),
            is_our_turn: self.is_our_turn(timeline),
        }
    }

    /// Places `champion` in the target slot and advances the cursor.
    /// Does not check `taken_champion_ids`; callers do that first.
    pub fn apply_champion(&mut self, timeline: &[TurnAction], champion: Champion) -> bool {
        let slot = match self.target_slot(timeline) {
            Some(slot) => slot,
            None => return false,
        };

        if !self.board.place(slot, champion) {
            return false;
        }
        self.history.push(slot);
        self.cursor += 1;
        true
    }

    /// Steps the cursor back one turn and clears the slot that turn filled.
    pub fn undo(&mut self, timeline: &[TurnAction]) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;

        let slot = self.history.pop().or_else(|| {
            let action = timeline.get(self.cursor)?;
            let index = self.board.last_filled_index(action.kind, action.side)?;
            Some(SlotRef::new(action.kind, action.side, index))
        });

        if let Some(slot) = slot {
            self.board.clear(slot);
        }
    }

    /// Empties the board and rewinds the cursor. `our_side` is kept.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.capacity());
        self.cursor = 0;
        self.is_first_pick = true;
        self.history.clear();
    }

    pub fn set_our_side(&mut self, side: Side) {
        self.our_side = side;
    }

    pub fn set_first_pick(&mut self, is_first_pick: bool) {
        self.is_first_pick = is_first_pick;
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        let ids = |kind: ActionKind, side: Side| {
            self.board
                .row(kind, side)
                .iter()
                .map(|slot| slot.as_ref().map(|c| c.id.clone()))
                .collect::<Vec<Option<String>>>()
        };

        DraftSnapshot {
            our_side: self.our_side,
            cursor: self.cursor,
            is_first_pick: self.is_first_pick,
            picks: SideRows {
                blue: ids(ActionKind::Pick, Side::Blue),
                red: ids(ActionKind::Pick, Side::Red),
            },
            bans: SideRows {
                blue: ids(ActionKind::Ban, Side::Blue),
                red: ids(ActionKind::Ban, Side::Red),
            },
        }
    }
}
