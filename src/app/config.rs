use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::context::{Context, FORMAT_KEY};
use crate::draft::DEFAULT_SLOT_CAPACITY;
use crate::models::draft_format::Side;
use crate::opt::*;

const RESOURCE_DIR_VAR: &str = "DRAFT_RESOURCE_DIR";
const SLOT_CAPACITY_VAR: &str = "DRAFT_SLOT_CAPACITY";
const FORMAT_VAR: &str = "DRAFT_FORMAT";
const OUR_SIDE_VAR: &str = "DRAFT_OUR_SIDE";

const DEFAULT_RESOURCE_DIR: &str = "./resource";
const DEFAULT_FORMAT: &str = "standard";
const MAX_SLOT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub resource_dir: PathBuf,
    pub slot_capacity: usize,
    pub format_key: String,
    pub our_side: Side,
}

impl AppConfig {
    /// Environment first, then what the last session saved, then defaults.
    pub fn load(context: &Context) -> Res<Self> {
        Self::from_lookup(|var| env::var(var).ok(), context)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, context: &Context) -> Res<Self> {
        let slot_capacity = match lookup(SLOT_CAPACITY_VAR) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| (1..=MAX_SLOT_CAPACITY).contains(capacity))
                .ok_or(format!(
                    "{} must be between 1 and {}, got [{}]",
                    SLOT_CAPACITY_VAR, MAX_SLOT_CAPACITY, value
                ))?,
            None => DEFAULT_SLOT_CAPACITY,
        };

        let our_side = match lookup(OUR_SIDE_VAR) {
            Some(value) => Side::from_str(value.trim())
                .map_err(|_| format!("{} must be blue or red, got [{}]", OUR_SIDE_VAR, value))?,
            None => context.our_side().unwrap_or(Side::Blue),
        };

        Ok(AppConfig {
            resource_dir: lookup(RESOURCE_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCE_DIR)),
            slot_capacity,
            format_key: lookup(FORMAT_VAR)
                .or_else(|| context.read_data(FORMAT_KEY))
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            our_side,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::context::{load_data_from_file, OUR_SIDE_KEY};

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<String, String>>();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let context = load_data_from_file(file.path()).unwrap();

        let config = AppConfig::from_lookup(lookup_from(&[]), &context).unwrap();
        assert_eq!(config.slot_capacity, DEFAULT_SLOT_CAPACITY);
        assert_eq!(config.format_key, DEFAULT_FORMAT);
        assert_eq!(config.our_side, Side::Blue);
        assert_eq!(config.resource_dir, PathBuf::from(DEFAULT_RESOURCE_DIR));
    }

    #[test]
    fn test_saved_preferences() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let context = load_data_from_file(file.path()).unwrap();
        context.write_data(OUR_SIDE_KEY, "red").unwrap();
        context.write_data(FORMAT_KEY, "quick").unwrap();

        let config = AppConfig::from_lookup(lookup_from(&[]), &context).unwrap();
        assert_eq!(config.our_side, Side::Red);
        assert_eq!(config.format_key, "quick");

        let config =
            AppConfig::from_lookup(lookup_from(&[(FORMAT_VAR, "standard"), (OUR_SIDE_VAR, "Blue")]), &context)
                .unwrap();
        assert_eq!(config.format_key, "standard");
        assert_eq!(config.our_side, Side::Blue);
    }

    #[test]
    fn test_invalid_values() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let context = load_data_from_file(file.path()).unwrap();

        assert!(AppConfig::from_lookup(lookup_from(&[(SLOT_CAPACITY_VAR, "0")]), &context).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(SLOT_CAPACITY_VAR, "five")]), &context).is_err());
        let err = AppConfig::from_lookup(lookup_from(&[(SLOT_CAPACITY_VAR, "18446744073709551615")]), &context)
            .unwrap_err();
        assert!(err.contains("between 1 and 16"), "{}", err);

        let config = AppConfig::from_lookup(lookup_from(&[(SLOT_CAPACITY_VAR, "16")]), &context).unwrap();
        assert_eq!(config.slot_capacity, MAX_SLOT_CAPACITY);
        assert!(AppConfig::from_lookup(lookup_from(&[(OUR_SIDE_VAR, "green")]), &context).is_err());
    }
}
