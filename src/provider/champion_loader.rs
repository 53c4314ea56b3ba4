use std::collections::HashMap;
use std::path::Path;

use super::{ChampionMatcher, ChampionProvider};
use crate::models::champion::Champion;
use crate::opt::*;

const CHAMPION_FILE_NAME: &str = "champions.json";

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Provider);
}

/// The champion catalog, loaded once at startup.
pub struct ChampionLoader {
    champions: Vec<Champion>,
    by_id: HashMap<String, usize>,
}

impl ChampionLoader {
    pub async fn load(resource_dir: &Path) -> Res<Self> {
        let path = resource_dir.join(CHAMPION_FILE_NAME);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| format!("Unable to read {}: {}", path.display(), err))?;
        let champions: Vec<Champion> = serde_json::from_str(&content)
            .map_err(|err| format!("Unable to parse {}: {}", path.display(), err))?;

        log(format!("Loaded {} champions from {}", champions.len(), path.display()));
        Self::from_champions(champions)
    }

    pub fn from_champions(champions: Vec<Champion>) -> Res<Self> {
        let mut by_id = HashMap::new();
        for (idx, champion) in champions.iter().enumerate() {
            if by_id.insert(champion.id.clone(), idx).is_some() {
                return Err(format!("Duplicate champion id [{}]", champion.id));
            }
        }

        Ok(ChampionLoader { champions, by_id })
    }

    pub fn champions(&self) -> &[Champion] {
        &self.champions
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Champion> {
        self.by_id.get(id).map(|idx| &self.champions[*idx])
    }

    pub fn matcher(&self) -> ChampionMatcher {
        ChampionMatcher::new(&self.champions)
    }
}

impl ChampionProvider for ChampionLoader {
    async fn list_champions(&self) -> Res<Vec<Champion>> {
        Ok(self.champions.clone())
    }

    async fn get_champion(&self, id: &str) -> Res<Option<Champion>> {
        Ok(self.find_by_id(id).cloned())
    }
}
