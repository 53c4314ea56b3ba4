use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;

use crate::models::draft_format::Side;
use crate::opt::*;

const APP_NAME: &str = "champ-draft";
const APP_AUTHOR: &str = "champ-draft";
const APP_QUALIFIER: &str = "com";

const RUNTIME_FILE_NAME: &str = "runtime_data.json";

pub const OUR_SIDE_KEY: &str = "our_side";
pub const FORMAT_KEY: &str = "format_key";
pub const CURRENT_DRAFT_ID_KEY: &str = "current_draft_id";

/// Small key/value store for preferences that outlive a draft, saved as JSON
/// in the platform data directory.
pub struct Context {
    pub data: Arc<RwLock<HashMap<String, String>>>,
    data_dir: PathBuf,
    runtime_file_path: PathBuf,
}

pub fn create_context() -> Res<Context> {
    let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_AUTHOR, APP_NAME)
        .ok_or("Unable to resolve the project directory")?;

    let data_dir = project_dirs.data_local_dir();
    log_if(&format!("Runtime directory: {:?}", data_dir), DbgFlg::Cli);

    std::fs::create_dir_all(data_dir)
        .map_err(|err| format!("Unable to create {}: {}", data_dir.display(), err))?;

    load_data_from_file(&data_dir.join(RUNTIME_FILE_NAME))
}

pub fn load_data_from_file(runtime_file_path: &Path) -> Res<Context> {
    let data = if runtime_file_path.exists() {
        let contents = std::fs::read_to_string(runtime_file_path).err_to_str()?;
        if contents.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str::<HashMap<String, String>>(&contents).err_to_str()?
        }
    } else {
        HashMap::new()
    };

    Ok(Context {
        data: Arc::new(RwLock::new(data)),
        data_dir: runtime_file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        runtime_file_path: runtime_file_path.to_path_buf(),
    })
}

impl Context {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn read_data(&self, key: &str) -> Option<String> {
        let data_read = self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        data_read.get(key).map(|s| s.to_string())
    }

    pub fn write_data(&self, key: &str, value: &str) -> Res<()> {
        let mut data_write = self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        data_write.insert(key.to_string(), value.to_string());
        save_data(&self.runtime_file_path, &data_write)
    }

    pub fn our_side(&self) -> Option<Side> {
        self.read_data(OUR_SIDE_KEY)
            .and_then(|side| Side::from_str(&side).ok())
    }
}

fn save_data(runtime_file_path: &Path, data: &HashMap<String, String>) -> Res<()> {
    let content = serde_json::to_string(data).err_to_str()?;
    std::fs::write(runtime_file_path, content)
        .map_err(|err| format!("Unable to write {}: {}", runtime_file_path.display(), err))
}
