use std::collections::HashSet;

use super::board::SlotRef;
use super::state::{DraftState, DraftStatus};
use super::timeline::{build_timeline, phase_position, Timeline, TurnAction};
use crate::models::champion::{Champion, Role};
use crate::models::draft_format::{Format, Side};
use crate::models::recommendation::{RecommendationRequest, TargetDescriptor};
use crate::opt::*;

const DRAFT_ID_LENGTH: usize = 8;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Draft);
}

/// One active draft: the format, its expanded timeline and the mutable state.
/// The timeline is rebuilt every time the format changes; everything else is
/// computed from `state` on each call.
pub struct DraftSession {
    id: String,
    format_key: Option<String>,
    format: Option<Format>,
    timeline: Timeline,
    state: DraftState,
}

impl DraftSession {
    pub fn new(our_side: Side, capacity: usize) -> Self {
        DraftSession {
            id: new_id(DRAFT_ID_LENGTH),
            format_key: None,
            format: None,
            timeline: Timeline::new(),
            state: DraftState::new(our_side, capacity),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn format_key(&self) -> Option<&str> {
        self.format_key.as_deref()
    }

    pub fn format(&self) -> Option<&Format> {
        self.format.as_ref()
    }

    pub fn timeline(&self) -> &[TurnAction] {
        &self.timeline
    }

    pub fn state(&self) -> &DraftState {
        &self.state
    }

    /// Switching formats starts a fresh draft, so the cursor never points
    /// past the new timeline.
    pub fn set_format(&mut self, key: &str, format: Format) -> Res<()> {
        format.validate(self.state.board().capacity())?;

        self.timeline = build_timeline(Some(&format));
        self.format_key = Some(key.to_string());
        self.format = Some(format);
        self.reset();

        log(format!(
            "Draft [{}] uses format [{}] with {} turns",
            self.id,
            key,
            self.timeline.len()
        ));
        Ok(())
    }

    pub fn status(&self) -> DraftStatus {
        self.state.status(&self.timeline)
    }

    pub fn target_slot(&self) -> Option<SlotRef> {
        self.state.target_slot(&self.timeline)
    }

    pub fn taken_champion_ids(&self) -> HashSet<String> {
        self.state.taken_champion_ids()
    }

    pub fn apply_champion(&mut self, champion: Champion) -> bool {
        let name = champion.name.clone();
        let applied = self.state.apply_champion(&self.timeline, champion);
        log(format!(
            "Draft [{}] apply [{}]: {} (cursor {})",
            self.id,
            name,
            applied,
            self.state.cursor()
        ));
        applied
    }

    /// Checked variant of `apply_champion` used by front-ends.
    pub fn pick(&mut self, champion: Champion) -> Res<SlotRef> {
        if self.taken_champion_ids().contains(&champion.id) {
            return Err(format!("{} is already picked or banned", champion.name));
        }

        let slot = match self.target_slot() {
            Some(slot) => slot,
            None if self.state.current_action(&self.timeline).is_none() => {
                return Err("The draft is complete".to_string());
            }
            None => return Err("No free slot left for the current turn".to_string()),
        };

        if !self.apply_champion(champion) {
            return Err("Unable to apply champion".to_string());
        }
        Ok(slot)
    }

    pub fn undo(&mut self) {
        self.state.undo(&self.timeline);
        log(format!("Draft [{}] undo (cursor {})", self.id, self.state.cursor()));
    }

    /// Clears the board and starts a new draft id; our side is kept.
    pub fn reset(&mut self) {
        self.state.reset();
        self.id = new_id(DRAFT_ID_LENGTH);
        log(format!("Draft reset, new id [{}]", self.id));
    }

    pub fn set_our_side(&mut self, side: Side) {
        if self.state.cursor() > 0 && side != self.state.our_side() {
            log(format!(
                "Draft [{}] switches to {} at turn {}",
                self.id,
                side,
                self.state.cursor()
            ));
        }
        self.state.set_our_side(side);
    }

    pub fn set_first_pick(&mut self, is_first_pick: bool) {
        self.state.set_first_pick(is_first_pick);
    }

    pub fn recommendation_target(&self) -> Option<TargetDescriptor> {
        let slot = self.target_slot()?;
        let position = phase_position(self.format.as_ref()?, self.state.cursor())?;

        Some(TargetDescriptor {
            kind: slot.kind,
            side: slot.side,
            slot_index: slot.index,
            phase_index: position.phase_index,
            index_in_phase: position.index_in_phase,
            global_index: position.global_index,
        })
    }

    pub fn recommendation_request(
        &self,
        profile_name: Option<&str>,
        role: Option<Role>,
    ) -> Option<RecommendationRequest> {
        Some(RecommendationRequest {
            format: self.format_key.clone()?,
            our_side: self.state.our_side(),
            draft_state: self.state.snapshot(),
            target: self.recommendation_target()?,
            profile_name: profile_name.map(str::to_string),
            role,
        })
    }
}
