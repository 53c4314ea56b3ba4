//! Collaborators the draft engine talks to: formats, champions, profiles and
//! recommendations. The implementations here are file backed; the engine only
//! sees the traits.

mod champion_loader;
mod champion_matcher;
mod format_loader;
mod profile_store;
mod recommender;

pub use champion_loader::ChampionLoader;
pub use champion_matcher::ChampionMatcher;
pub use format_loader::FormatLoader;
pub use profile_store::ProfileStore;
pub use recommender::{ProfileRecommender, DEFAULT_RECOMMENDATION_LIMIT};

use crate::models::champion::{Champion, Role};
use crate::models::draft_format::Format;
use crate::models::profile::{NewProfileEntry, ProfileEntry, ProfileEntryPatch};
use crate::models::recommendation::{Recommendation, RecommendationRequest};
use crate::opt::Res;

pub trait FormatProvider {
    async fn get_format(&self, key: &str) -> Res<Format>;
    async fn list_formats(&self) -> Res<Vec<(String, Format)>>;
}

pub trait ChampionProvider {
    async fn list_champions(&self) -> Res<Vec<Champion>>;
    async fn get_champion(&self, id: &str) -> Res<Option<Champion>>;
}

pub trait ProfileProvider {
    async fn list_profiles(&self) -> Res<Vec<String>>;
    async fn list_entries(&self, profile_name: &str, role: Role) -> Res<Vec<ProfileEntry>>;
    async fn create_entry(&self, entry: NewProfileEntry) -> Res<ProfileEntry>;
    async fn update_entry(&self, id: &str, patch: ProfileEntryPatch) -> Res<ProfileEntry>;
    async fn delete_entry(&self, id: &str) -> Res<()>;
}

/// Advisory only: implementations never touch the draft itself.
pub trait RecommendationProvider {
    async fn recommend(&self, request: &RecommendationRequest) -> Res<Vec<Recommendation>>;
}
