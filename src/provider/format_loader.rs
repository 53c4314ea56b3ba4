use std::collections::HashMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use super::FormatProvider;
use crate::models::draft_format::Format;
use crate::opt::*;

const FORMAT_FILE_NAME: &str = "draft_formats.json";

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Provider);
}

/// Reads `draft_formats.json`, a map of format key to format, on every call
/// so edits to the file show up without a restart.
pub struct FormatLoader {
    path: PathBuf,
    capacity: usize,
}

impl FormatLoader {
    pub fn new(resource_dir: &Path, capacity: usize) -> Self {
        FormatLoader {
            path: resource_dir.join(FORMAT_FILE_NAME),
            capacity,
        }
    }

    async fn load(&self) -> Res<HashMap<String, Format>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| format!("Unable to read {}: {}", self.path.display(), err))?;
        let formats: HashMap<String, Format> = serde_json::from_str(&content)
            .map_err(|err| format!("Unable to parse {}: {}", self.path.display(), err))?;

        for (key, format) in formats.iter() {
            format
                .validate(self.capacity)
                .map_err(|err| format!("Invalid format [{}]: {}", key, err))?;
        }

        log(format!("Loaded {} formats from {}", formats.len(), self.path.display()));
        formats.keys().sorted().collect::<Vec<_>>().dbg_if(DbgFlg::Provider);
        Ok(formats)
    }
}

impl FormatProvider for FormatLoader {
    async fn get_format(&self, key: &str) -> Res<Format> {
        let mut formats = self.load().await?;
        formats.remove(key).ok_or_else(|| {
            format!(
                "Unknown format [{}], available: {}",
                key,
                formats.keys().sorted().join(", ")
            )
        })
    }

    async fn list_formats(&self) -> Res<Vec<(String, Format)>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .sorted_by(|a, b| a.0.cmp(&b.0))
            .collect())
    }
}
