use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use itertools::Itertools;

use super::ProfileProvider;
use crate::models::champion::Role;
use crate::models::profile::{NewProfileEntry, ProfileEntry, ProfileEntryPatch};
use crate::opt::*;

const PROFILE_FILE_NAME: &str = "profiles.json";
const ENTRY_ID_LENGTH: usize = 10;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Provider);
}

/// Profile entries kept in memory and written back to `profiles.json` after
/// every change.
pub struct ProfileStore {
    entries: Arc<RwLock<Vec<ProfileEntry>>>,
    writer: tokio::sync::Mutex<()>,
    file_path: PathBuf,
}

impl ProfileStore {
    pub async fn open(data_dir: &Path) -> Res<Self> {
        Self::open_file(&data_dir.join(PROFILE_FILE_NAME)).await
    }

    pub async fn open_file(file_path: &Path) -> Res<Self> {
        let entries: Vec<ProfileEntry> = match tokio::fs::read_to_string(file_path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content)
                .map_err(|err| format!("Unable to parse {}: {}", file_path.display(), err))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(format!("Unable to read {}: {}", file_path.display(), err)),
        };

        log(format!("Loaded {} profile entries from {}", entries.len(), file_path.display()));
        Ok(ProfileStore {
            entries: Arc::new(RwLock::new(entries)),
            writer: tokio::sync::Mutex::new(()),
            file_path: file_path.to_path_buf(),
        })
    }

    fn read_entries(&self) -> Vec<ProfileEntry> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Applies `change` to a copy of the entries and swaps it in once the
    /// file is written, so a failed write leaves the store untouched.
    async fn modify<T>(&self, change: impl FnOnce(&mut Vec<ProfileEntry>) -> Res<T>) -> Res<T> {
        let _writer = self.writer.lock().await;

        let mut entries = self.read_entries();
        let result = change(&mut entries)?;
        let content = serde_json::to_string_pretty(&entries).err_to_str()?;

        tokio::fs::write(&self.file_path, content)
            .await
            .map_err(|err| format!("Unable to write {}: {}", self.file_path.display(), err))?;

        *self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = entries;
        Ok(result)
    }
}

impl ProfileProvider for ProfileStore {
    async fn list_profiles(&self) -> Res<Vec<String>> {
        Ok(self
            .read_entries()
            .into_iter()
            .map(|entry| entry.profile_name)
            .unique()
            .sorted()
            .collect())
    }

    async fn list_entries(&self, profile_name: &str, role: Role) -> Res<Vec<ProfileEntry>> {
        Ok(self
            .read_entries()
            .into_iter()
            .filter(|entry| entry.profile_name == profile_name && entry.role == role)
            .sorted_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.champion_id.cmp(&b.champion_id)))
            .collect())
    }

    async fn create_entry(&self, entry: NewProfileEntry) -> Res<ProfileEntry> {
        if entry.profile_name.trim().is_empty() {
            return Err("Profile name is required".to_string());
        }

        let created = self
            .modify(|entries| {
                let duplicate = entries.iter().any(|e| {
                    e.profile_name == entry.profile_name
                        && e.role == entry.role
                        && e.champion_id == entry.champion_id
                });
                if duplicate {
                    return Err(format!(
                        "{} is already in profile [{}] for {}",
                        entry.champion_id, entry.profile_name, entry.role
                    ));
                }

                let created = entry.into_entry(new_id(ENTRY_ID_LENGTH));
                entries.push(created.clone());
                Ok(created)
            })
            .await?;

        log(format!("Created profile entry [{}]", created.id));
        Ok(created)
    }

    async fn update_entry(&self, id: &str, patch: ProfileEntryPatch) -> Res<ProfileEntry> {
        self.modify(|entries| {
            let entry = entries
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(format!("Unknown profile entry [{}]", id))?;
            entry.apply(patch);
            Ok(entry.clone())
        })
        .await
    }

    async fn delete_entry(&self, id: &str) -> Res<()> {
        self.modify(|entries| {
            let (idx, _) = entries
                .iter()
                .find_position(|e| e.id == id)
                .ok_or(format!("Unknown profile entry [{}]", id))?;
            entries.remove(idx);
            Ok(())
        })
        .await?;

        log(format!("Deleted profile entry [{}]", id));
        Ok(())
    }
}
