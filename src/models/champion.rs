use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Adc,
    Support,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Champion {
    #[cfg(test)]
    pub fn new(id: &str, name: &str) -> Self {
        Champion {
            id: id.to_string(),
            name: name.to_string(),
            roles: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn plays(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn to_text(&self) -> String {
        if self.roles.is_empty() {
            return self.name.clone();
        }
        format!("{:16} {}", self.name, self.roles.iter().join("/"))
    }
}

impl Display for Champion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
