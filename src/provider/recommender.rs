use std::collections::HashSet;

use itertools::Itertools;
use strum::IntoEnumIterator;

use super::{ProfileProvider, RecommendationProvider};
use crate::models::champion::{Champion, Role};
use crate::models::draft_format::ActionKind;
use crate::models::profile::ProfileEntry;
use crate::models::recommendation::{Recommendation, RecommendationRequest};
use crate::opt::*;

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 8;

const ROLE_MATCH_SCORE: u32 = 5;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Provider);
}

/// Local stand-in for the recommendation backend.
///
/// Pick turns rank the profile's entries for the requested role by tier, then
/// fill up with catalog champions that play the role. Ban turns suggest
/// catalog champions that are not part of the profile, role players first.
/// Champions already on the board are never suggested.
pub struct ProfileRecommender<'a, P: ProfileProvider> {
    champions: &'a [Champion],
    profiles: &'a P,
    limit: usize,
}

impl<'a, P: ProfileProvider> ProfileRecommender<'a, P> {
    pub fn new(champions: &'a [Champion], profiles: &'a P) -> Self {
        ProfileRecommender {
            champions,
            profiles,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn champion(&self, id: &str) -> Option<&'a Champion> {
        self.champions.iter().find(|c| c.id == id)
    }

    async fn profile_entries(&self, request: &RecommendationRequest) -> Res<Vec<ProfileEntry>> {
        let profile_name = match request.profile_name.as_deref() {
            Some(name) => name,
            None => return Ok(Vec::new()),
        };

        let mut entries = Vec::new();
        match request.role {
            Some(role) => entries.extend(self.profiles.list_entries(profile_name, role).await?),
            None => {
                for role in Role::iter() {
                    entries.extend(self.profiles.list_entries(profile_name, role).await?);
                }
            }
        }
        Ok(entries)
    }

    fn catalog_suggestions(
        &self,
        role: Option<Role>,
        excluded: &HashSet<String>,
        reason_prefix: &str,
    ) -> Vec<Recommendation> {
        self.champions
            .iter()
            .filter(|c| !excluded.contains(&c.id))
            .map(|c| {
                let plays_role = role.map_or(false, |role| c.plays(role));
                let reason = match role {
                    Some(role) if plays_role => format!("{}, plays {}", reason_prefix, role),
                    _ => reason_prefix.to_string(),
                };
                Recommendation {
                    champion_id: c.id.clone(),
                    name: c.name.clone(),
                    score: if plays_role { ROLE_MATCH_SCORE } else { 0 },
                    reason,
                }
            })
            .filter(|rec| role.is_none() || rec.score > 0)
            .collect()
    }
}

impl<'a, P: ProfileProvider> RecommendationProvider for ProfileRecommender<'a, P> {
    async fn recommend(&self, request: &RecommendationRequest) -> Res<Vec<Recommendation>> {
        let taken = request.draft_state.taken_champion_ids();
        let entries = self.profile_entries(request).await?;

        let recommendations = match request.target.kind {
            ActionKind::Pick => {
                let from_profile = entries
                    .iter()
                    .filter(|entry| !taken.contains(&entry.champion_id))
                    .filter_map(|entry| {
                        let champion = self.champion(&entry.champion_id)?;
                        Some(Recommendation {
                            champion_id: champion.id.clone(),
                            name: champion.name.clone(),
                            score: entry.tier.weight(),
                            reason: format!("{} tier in {} {}", entry.tier, entry.profile_name, entry.role),
                        })
                    })
                    .collect::<Vec<Recommendation>>();
                let from_catalog = self.catalog_suggestions(request.role, &taken, "catalog");

                from_profile.into_iter().chain(from_catalog).collect::<Vec<_>>()
            }
            ActionKind::Ban => {
                let excluded = taken
                    .iter()
                    .cloned()
                    .chain(entries.iter().map(|entry| entry.champion_id.clone()))
                    .collect::<HashSet<String>>();
                self.catalog_suggestions(request.role, &excluded, "not in profile")
            }
        };

        let ranked = recommendations
            .into_iter()
            .unique_by(|rec| rec.champion_id.clone())
            .sorted_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)))
            .take(self.limit)
            .collect::<Vec<Recommendation>>();

        log(format!(
            "{} recommendations for {} {} (turn {})",
            ranked.len(),
            request.target.side,
            request.target.kind,
            request.target.global_index
        ));
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{DraftSession, DEFAULT_SLOT_CAPACITY};
    use crate::models::draft_format::{Format, PhaseSpec, Side};
    use crate::models::profile::{NewProfileEntry, Tier};
    use crate::provider::ProfileStore;

    fn champ(id: &str, name: &str, role: Role) -> Champion {
        Champion {
            roles: vec![role],
            ..Champion::new(id, name)
        }
    }

    fn catalog() -> Vec<Champion> {
        vec![
            champ("ahri", "Ahri", Role::Mid),
            champ("syndra", "Syndra", Role::Mid),
            champ("zed", "Zed", Role::Mid),
            champ("jinx", "Jinx", Role::Adc),
            champ("thresh", "Thresh", Role::Support),
        ]
    }

    async fn store_with_mids() -> (ProfileStore, tempfile::NamedTempFile) {
        let file = tempfile::NamedTempFile::new().expect("Failed to create a temp file");
        let store = ProfileStore::open_file(file.path()).await.unwrap();
        store.create_entry(NewProfileEntry::new("main", Role::Mid, "ahri", Tier::A)).await.unwrap();
        store.create_entry(NewProfileEntry::new("main", Role::Mid, "syndra", Tier::S)).await.unwrap();
        (store, file)
    }

    fn session(phases: Vec<PhaseSpec>) -> DraftSession {
        let mut session = DraftSession::new(Side::Blue, DEFAULT_SLOT_CAPACITY);
        session.set_format("test", Format::new("test", phases)).unwrap();
        session
    }

    #[tokio::test]
    async fn test_pick_ranks_profile_first() {
        let champions = catalog();
        let (store, _file) = store_with_mids().await;
        let session = session(vec![PhaseSpec::new(ActionKind::Pick, Side::Blue, 1)]);
        let request = session.recommendation_request(Some("main"), Some(Role::Mid)).unwrap();

        let recs = ProfileRecommender::new(&champions, &store).recommend(&request).await.unwrap();
        assert_eq!(
            recs.iter().map(|r| r.champion_id.as_str()).collect::<Vec<&str>>(),
            vec!["syndra", "ahri", "zed"]
        );
        assert_eq!(recs[0].score, Tier::S.weight());
    }

    #[tokio::test]
    async fn test_pick_skips_taken() {
        let champions = catalog();
        let (store, _file) = store_with_mids().await;
        let mut session = session(vec![
            PhaseSpec::new(ActionKind::Ban, Side::Red, 1),
            PhaseSpec::new(ActionKind::Pick, Side::Blue, 1),
        ]);
        session.pick(champions[1].clone()).unwrap();
        let request = session.recommendation_request(Some("main"), Some(Role::Mid)).unwrap();

        let recs = ProfileRecommender::new(&champions, &store).recommend(&request).await.unwrap();
        assert_eq!(
            recs.iter().map(|r| r.champion_id.as_str()).collect::<Vec<&str>>(),
            vec!["ahri", "zed"]
        );
    }

    #[tokio::test]
    async fn test_ban_avoids_profile() {
        let champions = catalog();
        let (store, _file) = store_with_mids().await;
        let session = session(vec![PhaseSpec::new(ActionKind::Ban, Side::Blue, 1)]);
        let request = session.recommendation_request(Some("main"), None).unwrap();

        let recs = ProfileRecommender::new(&champions, &store)
            .with_limit(2)
            .recommend(&request)
            .await
            .unwrap();
        assert_eq!(
            recs.iter().map(|r| r.champion_id.as_str()).collect::<Vec<&str>>(),
            vec!["jinx", "thresh"]
        );
    }
}
