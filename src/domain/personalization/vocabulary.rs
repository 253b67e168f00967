//! Fixed tag vocabularies shared by the normalizer, classifier and decision tree.
//!
//! Place types, categories and themes match by exact (lowercased) tag.
//! Weather conditions match by substring, so "heavy rain" and "foggy" hit.

use once_cell::sync::Lazy;
use std::collections::HashSet;

type Vocabulary = Lazy<HashSet<&'static str>>;

pub static OUTDOOR_PLACES: Vocabulary = Lazy::new(|| {
    HashSet::from([
        "park",
        "mountain",
        "hiking_area",
        "natural_feature",
        "campground",
        "stadium",
        "playground",
        "beach",
        "forest",
    ])
});

pub static URBAN_PLACES: Vocabulary = Lazy::new(|| {
    HashSet::from([
        "restaurant",
        "cafe",
        "store",
        "shopping_mall",
        "museum",
        "gym",
        "nightclub",
    ])
});

pub static MOUNTAIN_PLACES: Vocabulary =
    Lazy::new(|| HashSet::from(["mountain", "hiking_area", "natural_feature"]));

pub static CHILL_PLACES: Vocabulary = Lazy::new(|| HashSet::from(["park", "beach"]));

/// Substrings; "storm" also catches "thunderstorm".
pub static EXTREME_WEATHER: Vocabulary = Lazy::new(|| {
    HashSet::from(["thunderstorm", "blizzard", "heavy rain", "fog", "snow", "storm"])
});

pub static ENERGETIC_NEWS: Vocabulary =
    Lazy::new(|| HashSet::from(["sports", "politics", "technology", "science"]));

pub static TENSE_NEWS: Vocabulary = Lazy::new(|| {
    HashSet::from([
        "crisis",
        "war",
        "disaster",
        "crime",
        "election",
        "protest",
        "emergency",
    ])
});

pub static CALM_NEWS: Vocabulary = Lazy::new(|| {
    HashSet::from([
        "arts",
        "entertainment",
        "lifestyle",
        "travel",
        "culture",
        "music",
    ])
});

/// True when any lowercased tag is in `vocabulary`.
pub fn any_in(tags: &[String], vocabulary: &HashSet<&'static str>) -> bool {
    tags.iter().any(|t| vocabulary.contains(t.as_str()))
}

/// True when the lowercased condition contains an extreme-weather term.
pub fn is_extreme_weather(condition: &str) -> bool {
    EXTREME_WEATHER.iter().any(|term| condition.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extreme_weather_matches_substrings() {
        assert!(is_extreme_weather("thunderstorm"));
        assert!(is_extreme_weather("heavy rain"));
        assert!(is_extreme_weather("foggy"));
        assert!(is_extreme_weather("heavy snow"));
        assert!(!is_extreme_weather("rain showers"));
        assert!(!is_extreme_weather("clear"));
        assert!(!is_extreme_weather("overcast"));
    }

    #[test]
    fn any_in_uses_exact_tags() {
        let tags = vec!["parking".to_string()];
        assert!(!any_in(&tags, &OUTDOOR_PLACES));
        let tags = vec!["cafe".to_string()];
        assert!(any_in(&tags, &URBAN_PLACES));
    }

    #[test]
    fn mountain_places_are_outdoor() {
        assert!(MOUNTAIN_PLACES.iter().all(|p| OUTDOOR_PLACES.contains(p)));
        assert!(CHILL_PLACES.iter().all(|p| OUTDOOR_PLACES.contains(p)));
    }
}
