use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

use crate::opt::*;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub(crate) fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActionKind {
    Pick,
    Ban,
}

impl ActionKind {
    pub(crate) fn index(self) -> usize {
        match self {
            ActionKind::Pick => 0,
            ActionKind::Ban => 1,
        }
    }
}

/// `count` consecutive turns of one kind for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSpec {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub side: Side,
    pub count: u32,
}

impl PhaseSpec {
    pub fn new(kind: ActionKind, side: Side, count: u32) -> Self {
        PhaseSpec { kind, side, count }
    }
}

impl Display for PhaseSpec {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.side, self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub phases: Vec<PhaseSpec>,
}

lazy_static! {
    static ref PHASE_CLAUSE: Regex =
        Regex::new(r"(?i)^\s*(pick|ban)\s+(blue|red)\s+(\d+)\s*$").unwrap();
}

impl Format {
    pub fn new(name: &str, phases: Vec<PhaseSpec>) -> Self {
        Format {
            name: name.to_string(),
            description: None,
            phases,
        }
    }

    pub fn total_turns(&self) -> usize {
        self.phases.iter().map(|ph| ph.count as usize).sum()
    }

    pub fn turns_for(&self, kind: ActionKind, side: Side) -> usize {
        self.phases
            .iter()
            .filter(|ph| ph.kind == kind && ph.side == side)
            .map(|ph| ph.count as usize)
            .sum()
    }

    /// Rejects empty phases and formats that ask a side for more turns of a
    /// kind than the board has slots for.
    pub fn validate(&self, capacity: usize) -> Res<()> {
        if let Some((idx, _)) = self.phases.iter().find_position(|ph| ph.count == 0) {
            return Err(format!(
                "Format [{}] phase {} has a zero count",
                self.name,
                idx + 1
            ));
        }

        for (kind, side) in self.phases.iter().map(|ph| (ph.kind, ph.side)).unique() {
            let turns = self.turns_for(kind, side);
            if turns > capacity {
                return Err(format!(
                    "Format [{}] asks {} for {} {}s but the board only has {} slots",
                    self.name, side, turns, kind, capacity
                ));
            }
        }

        Ok(())
    }

    /// Parses the compact notation `ban blue 3, ban red 3, pick blue 1`.
    pub fn parse_compact(name: &str, text: &str) -> Res<Format> {
        let phases = text
            .split(',')
            .filter(|clause| !clause.trim().is_empty())
            .map(parse_clause)
            .collect::<Res<Vec<PhaseSpec>>>()?;

        if phases.is_empty() {
            return Err("No phases given".to_string());
        }

        Ok(Format::new(name, phases))
    }

    pub fn to_compact(&self) -> String {
        self.phases.iter().map(|ph| ph.to_string()).join(", ")
    }
}

fn parse_clause(clause: &str) -> Res<PhaseSpec> {
    let caps = PHASE_CLAUSE
        .captures(clause)
        .ok_or(format!("Invalid phase [{}], expected `<pick|ban> <blue|red> <count>`", clause.trim()))?;

    let kind = ActionKind::from_str(&caps[1]).err_to_str()?;
    let side = Side::from_str(&caps[2]).err_to_str()?;
    let count = caps[3].parse::<u32>().err_to_str()?;

    Ok(PhaseSpec::new(kind, side, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_phase() {
        let phase: PhaseSpec =
            serde_json::from_str(r#"{"type":"ban","side":"red","count":3}"#).unwrap();
        assert_eq!(phase, PhaseSpec::new(ActionKind::Ban, Side::Red, 3));

        assert!(serde_json::from_str::<PhaseSpec>(r#"{"type":"ban","side":"green","count":3}"#).is_err());
        assert!(serde_json::from_str::<PhaseSpec>(r#"{"type":"swap","side":"red","count":3}"#).is_err());
        assert!(serde_json::from_str::<PhaseSpec>(r#"{"type":"ban","side":"red","count":-1}"#).is_err());
    }

    #[test]
    fn test_side_parse() {
        assert_eq!(Side::from_str("BLUE").unwrap(), Side::Blue);
        assert_eq!(Side::Red.to_string(), "red");
    }

    #[test]
    fn test_validate() {
        let format = Format::new(
            "ok",
            vec![
                PhaseSpec::new(ActionKind::Pick, Side::Blue, 3),
                PhaseSpec::new(ActionKind::Pick, Side::Blue, 2),
            ],
        );
        assert!(format.validate(5).is_ok());
        assert!(format.validate(4).unwrap_err().contains("only has 4 slots"));

        let zero = Format::new("zero", vec![PhaseSpec::new(ActionKind::Ban, Side::Red, 0)]);
        assert!(zero.validate(5).unwrap_err().contains("zero count"));

        assert!(Format::default().validate(5).is_ok());
    }

    #[test]
    fn test_parse_compact() {
        let format = Format::parse_compact("custom", "ban blue 3, BAN red 3,pick blue 1").unwrap();
        assert_eq!(
            format.phases,
            vec![
                PhaseSpec::new(ActionKind::Ban, Side::Blue, 3),
                PhaseSpec::new(ActionKind::Ban, Side::Red, 3),
                PhaseSpec::new(ActionKind::Pick, Side::Blue, 1),
            ]
        );
        assert_eq!(format.to_compact(), "ban blue 3, ban red 3, pick blue 1");

        assert!(Format::parse_compact("bad", "ban purple 2").is_err());
        assert!(Format::parse_compact("bad", "pick blue").is_err());
        assert!(Format::parse_compact("bad", " , ").is_err());
    }
}
