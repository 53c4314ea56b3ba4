use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use super::champion::Role;

/// Best tier first, so the derived ordering sorts strongest entries to the front.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    pub fn weight(self) -> u32 {
        match self {
            Tier::S => 50,
            Tier::A => 40,
            Tier::B => 30,
            Tier::C => 20,
            Tier::D => 10,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::B
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
    pub id: String,
    pub profile_name: String,
    pub role: Role,
    pub champion_id: String,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfileEntry {
    pub profile_name: String,
    pub role: Role,
    pub champion_id: String,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub note: String,
}

impl NewProfileEntry {
    pub fn new(profile_name: &str, role: Role, champion_id: &str, tier: Tier) -> Self {
        NewProfileEntry {
            profile_name: profile_name.to_string(),
            role,
            champion_id: champion_id.to_string(),
            tier,
            note: String::new(),
        }
    }

    pub fn into_entry(self, id: String) -> ProfileEntry {
        ProfileEntry {
            id,
            profile_name: self.profile_name,
            role: self.role,
            champion_id: self.champion_id,
            tier: self.tier,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntryPatch {
    pub role: Option<Role>,
    pub tier: Option<Tier>,
    pub note: Option<String>,
}

impl ProfileEntry {
    pub fn apply(&mut self, patch: ProfileEntryPatch) {
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(tier) = patch.tier {
            self.tier = tier;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
    }
}
