use std::fmt::{self, Display, Formatter};
use std::iter;

use serde::{Deserialize, Serialize};

use crate::models::draft_format::{ActionKind, Format, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub side: Side,
}

impl TurnAction {
    pub fn new(kind: ActionKind, side: Side) -> Self {
        TurnAction { kind, side }
    }
}

impl Display for TurnAction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}

pub type Timeline = Vec<TurnAction>;

/// Expands every phase into `count` consecutive turns, in phase order.
/// A missing format yields an empty timeline.
pub fn build_timeline(format: Option<&Format>) -> Timeline {
    format
        .map(|format| {
            format
                .phases
                .iter()
                .flat_map(|ph| iter::repeat(TurnAction::new(ph.kind, ph.side)).take(ph.count as usize))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasePosition {
    pub phase_index: usize,
    pub index_in_phase: usize,
    pub global_index: usize,
}

/// Locates timeline turn `turn` inside the phase that produced it.
pub fn phase_position(format: &Format, turn: usize) -> Option<PhasePosition> {
    let mut start = 0;
    for (phase_index, ph) in format.phases.iter().enumerate() {
        let end = start + ph.count as usize;
        if turn < end {
            return Some(PhasePosition {
                phase_index,
                index_in_phase: turn - start,
                global_index: turn,
            });
        }
        start = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::draft_format::PhaseSpec;

    fn sample_format() -> Format {
        Format::new(
            "sample",
            vec![
                PhaseSpec::new(ActionKind::Ban, Side::Blue, 2),
                PhaseSpec::new(ActionKind::Ban, Side::Red, 1),
                PhaseSpec::new(ActionKind::Pick, Side::Blue, 1),
                PhaseSpec::new(ActionKind::Pick, Side::Red, 3),
            ],
        )
    }

    #[test]
    fn test_build_timeline() {
        let format = sample_format();
        let timeline = build_timeline(Some(&format));

        assert_eq!(timeline.len(), format.total_turns());
        assert_eq!(
            timeline,
            vec![
                TurnAction::new(ActionKind::Ban, Side::Blue),
                TurnAction::new(ActionKind::Ban, Side::Blue),
                TurnAction::new(ActionKind::Ban, Side::Red),
                TurnAction::new(ActionKind::Pick, Side::Blue),
                TurnAction::new(ActionKind::Pick, Side::Red),
                TurnAction::new(ActionKind::Pick, Side::Red),
                TurnAction::new(ActionKind::Pick, Side::Red),
            ]
        );
    }

    #[test]
    fn test_build_timeline_without_format() {
        assert!(build_timeline(None).is_empty());
        assert!(build_timeline(Some(&Format::default())).is_empty());
    }

    #[test]
    fn test_phase_position() {
        let format = sample_format();

        assert_eq!(
            phase_position(&format, 1),
            Some(PhasePosition { phase_index: 0, index_in_phase: 1, global_index: 1 })
        );
        assert_eq!(
            phase_position(&format, 2),
            Some(PhasePosition { phase_index: 1, index_in_phase: 0, global_index: 2 })
        );
        assert_eq!(
            phase_position(&format, 6),
            Some(PhasePosition { phase_index: 3, index_in_phase: 2, global_index: 6 })
        );
        assert_eq!(phase_position(&format, 7), None);
    }

    #[test]
    fn test_turn_action_text() {
        assert_eq!(TurnAction::new(ActionKind::Ban, Side::Red).to_string(), "red ban");
    }
}
