//! DecisionPath - append-only trail of the rules visited during one evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered rule labels, for explainability only. Never read back as input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionPath(Vec<String>);

impl DecisionPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>) {
        self.0.push(label.into());
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DecisionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" → "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_in_order() {
        let mut path = DecisionPath::new();
        path.push("a");
        path.push(String::from("b"));

        assert_eq!(path.labels(), &["a".to_string(), "b".to_string()]);
        assert_eq!(path.last(), Some("b"));
        assert!(path.contains("a"));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn displays_as_arrow_chain() {
        let mut path = DecisionPath::new();
        path.push("music_dominant");
        path.push("tempo_fast");
        assert_eq!(path.to_string(), "music_dominant → tempo_fast");
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut path = DecisionPath::new();
        path.push("x");
        assert_eq!(serde_json::to_string(&path).unwrap(), "[\"x\"]");
    }
}
