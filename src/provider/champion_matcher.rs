use std::collections::{HashMap, HashSet};

use indicium::simple::SearchIndex;
use itertools::Itertools;
use strsim::levenshtein;

use crate::models::champion::Champion;
use crate::opt::*;

/// Resolves loosely typed champion names: exact id or name first, then the
/// full-text index, then per-word typo correction.
pub struct ChampionMatcher {
    index: SearchIndex<String>,
    name_tokens: HashSet<String>,
    by_key: HashMap<String, Champion>,
}

fn preprocess_text(text: &str) -> String {
    text.chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .join(" ")
}

fn max_distance(word: &str) -> usize {
    (word.chars().count() / 3).max(1)
}

fn correct_word(word: &str, dictionary: &HashSet<String>) -> String {
    if dictionary.contains(word) {
        return word.to_string();
    }

    dictionary
        .iter()
        .map(|dict_word| (levenshtein(word, dict_word), dict_word))
        .filter(|(dist, _)| *dist <= max_distance(word))
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map(|(_, dict_word)| dict_word.to_string())
        .unwrap_or_else(|| word.to_string())
}

impl ChampionMatcher {
    pub fn new(champions: &[Champion]) -> Self {
        let mut index = SearchIndex::default();
        let mut name_tokens = HashSet::new();
        let mut by_key = HashMap::new();

        for champion in champions {
            let name = preprocess_text(&champion.name);
            index.insert(&champion.id, &champion.name);
            name.split_whitespace().for_each(|token| {
                name_tokens.insert(token.to_string());
            });
            by_key.insert(name, champion.clone());
            by_key.insert(champion.id.to_lowercase(), champion.clone());
        }

        ChampionMatcher {
            index,
            name_tokens,
            by_key,
        }
    }

    fn find_exact(&self, text: &str) -> Option<&Champion> {
        self.by_key
            .get(text)
            .or_else(|| self.by_key.get(&text.replace(' ', "-")))
    }

    fn find_indexed(&self, text: &str) -> Res<Option<&Champion>> {
        let ids = self.index.search(text);
        let champions = ids
            .iter()
            .filter_map(|id| self.by_key.get(&id.to_lowercase()))
            .unique_by(|c| c.id.clone())
            .collect::<Vec<&Champion>>();

        match champions.len() {
            0 => Ok(None),
            1 => Ok(Some(champions[0])),
            _ => {
                // Prefer a clear nearest name before reporting ambiguity.
                let ranked = champions
                    .iter()
                    .map(|c| (levenshtein(text, &preprocess_text(&c.name)), *c))
                    .sorted_by_key(|(dist, _)| *dist)
                    .collect::<Vec<_>>();
                if ranked[0].0 < ranked[1].0 && ranked[0].0 <= max_distance(text) {
                    return Ok(Some(ranked[0].1));
                }
                Err(format!(
                    "Multiple champions found: {}",
                    ranked.iter().take(3).map(|(_, c)| format!("[{}]", c.name)).join(", ")
                ))
            }
        }
    }

    pub fn find(&self, input: &str) -> Res<Champion> {
        let text = preprocess_text(input);
        if text.is_empty() {
            return Err("No champion name given".to_string());
        }

        if let Some(champion) = self.find_exact(&text) {
            return Ok(champion.clone());
        }

        let corrected = text
            .split_whitespace()
            .map(|word| correct_word(word, &self.name_tokens))
            .join(" ");
        if let Some(champion) = self.find_exact(&corrected) {
            return Ok(champion.clone());
        }

        if let Some(champion) = self.find_indexed(&text)? {
            return Ok(champion.clone());
        }
        if corrected != text {
            if let Some(champion) = self.find_indexed(&corrected)? {
                return Ok(champion.clone());
            }
        }

        Err(format!("No champion found for [{}]", input.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> ChampionMatcher {
        ChampionMatcher::new(&[
            Champion::new("ahri", "Ahri"),
            Champion::new("lee-sin", "Lee Sin"),
            Champion::new("miss-fortune", "Miss Fortune"),
            Champion::new("kaisa", "Kai'Sa"),
        ])
    }

    #[test]
    fn test_find_exact() {
        let matcher = matcher();
        assert_eq!(matcher.find("Ahri").unwrap().id, "ahri");
        assert_eq!(matcher.find("  miss   FORTUNE ").unwrap().id, "miss-fortune");
        assert_eq!(matcher.find("lee-sin").unwrap().id, "lee-sin");
        assert_eq!(matcher.find("kai'sa").unwrap().id, "kaisa");
    }

    #[test]
    fn test_find_with_typo() {
        let matcher = matcher();
        assert_eq!(matcher.find("Lee Sn").unwrap().id, "lee-sin");
        assert_eq!(matcher.find("Mis Fortune").unwrap().id, "miss-fortune");
    }

    #[test]
    fn test_find_nothing() {
        let matcher = matcher();
        assert!(matcher.find("zzzz").unwrap_err().contains("No champion found"));
        assert!(matcher.find("  ").is_err());
    }

    #[test]
    fn test_correct_word() {
        let dictionary = HashSet::from(["sin".to_string(), "lee".to_string()]);
        assert_eq!(correct_word("sn", &dictionary), "sin");
        assert_eq!(correct_word("lee", &dictionary), "lee");
        assert_eq!(correct_word("xyzzy", &dictionary), "xyzzy");
    }
}
