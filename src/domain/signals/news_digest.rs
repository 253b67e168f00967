//! NewsDigest - folds fetched headlines into the engine's `NewsMetrics`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::personalization::NewsMetrics;

/// Most headlines kept in a digest.
pub const MAX_HEADLINES: usize = 15;

/// Most dominant themes extracted.
pub const MAX_THEMES: usize = 8;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "is",
        "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
        "will", "would", "could", "should", "may", "might", "must", "can", "new", "says",
    ])
});

/// A single headline as returned by a news source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Headline {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

pub struct NewsDigest;

impl NewsDigest {
    /// Builds news metrics from per-category batches, in fetch order.
    ///
    /// Titles are deduplicated (first occurrence wins) and capped at
    /// [`MAX_HEADLINES`]. Themes are drawn from every unique title, not just
    /// the capped list. Blank titles are dropped everywhere.
    pub fn from_headlines(batches: &[(String, Vec<Headline>)]) -> NewsMetrics {
        let mut seen = HashSet::new();
        let mut unique: Vec<String> = Vec::new();
        let mut categories = BTreeMap::new();

        for (category, headlines) in batches {
            let titles: Vec<String> = headlines
                .iter()
                .map(|h| h.title.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();

            for title in &titles {
                if seen.insert(title.clone()) {
                    unique.push(title.clone());
                }
            }
            if !titles.is_empty() {
                categories.insert(category.clone(), titles);
            }
        }

        let dominant_themes = Self::extract_themes(&unique);
        unique.truncate(MAX_HEADLINES);

        NewsMetrics {
            headlines: unique,
            categories,
            dominant_themes,
        }
    }

    /// Most frequent meaningful words, ties broken by first appearance.
    pub fn extract_themes(headlines: &[String]) -> Vec<String> {
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut order = 0usize;

        for headline in headlines {
            let cleaned: String = headline
                .to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
                .collect();

            for word in cleaned.split_whitespace() {
                if word.len() <= 3 || STOP_WORDS.contains(word) {
                    continue;
                }
                let entry = counts.entry(word.to_string()).or_insert_with(|| {
                    order += 1;
                    (0, order)
                });
                entry.0 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = counts
            .into_iter()
            .map(|(word, (count, first))| (word, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(MAX_THEMES)
            .map(|(word, _, _)| word)
            .collect()
    }
}
