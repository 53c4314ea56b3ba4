use serde::{Deserialize, Serialize};

use super::champion::Role;
use super::draft_format::{ActionKind, Side};
use crate::draft::DraftSnapshot;

/// Where the turn being recommended for sits in the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub side: Side,
    pub slot_index: usize,
    pub phase_index: usize,
    pub index_in_phase: usize,
    pub global_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub format: String,
    pub our_side: Side,
    pub draft_state: DraftSnapshot,
    pub target: TargetDescriptor,
    #[serde(default)]
    pub profile_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub champion_id: String,
    pub name: String,
    pub score: u32,
    pub reason: String,
}
