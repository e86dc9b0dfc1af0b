//! Keyword-based topic classification.
//!
//! A [`TopicTable`] is an ordered list of [`TopicRule`]s. Classification
//! lower-cases the input once and walks the rules top to bottom; the first
//! rule with any keyword occurring as a substring wins. Table order is the
//! only precedence mechanism, so overlapping topics ("friends" and
//! "friendship") resolve to whichever comes first.

use std::sync::LazyLock;

use serde::Deserialize;

use crate::error::TopicError;

/// Label returned when no rule matches.
pub const DEFAULT_TOPIC: &str = "other";

/// The built-in table, in precedence order.
const BUILTIN_RULES: &[(&str, &[&str])] = &[
    ("love", &["love", "heart", "romance", "affection"]),
    ("friends", &["friend", "friendship", "buddy", "pal"]),
    ("life", &["life", "living", "existence"]),
    ("news", &["news", "headline", "report", "journalism"]),
    ("holiday", &["holiday", "vacation", "festival"]),
    ("friendship", &["friendship", "companionship", "bond"]),
    ("war", &["war", "battle", "conflict"]),
    ("peace", &["peace", "harmony", "calm"]),
    ("character", &["character", "personality", "traits"]),
];

static BUILTIN: LazyLock<TopicTable> = LazyLock::new(|| {
    TopicTable {
        rules: BUILTIN_RULES
            .iter()
            .map(|(label, words)| TopicRule::new(*label, words.iter().copied()))
            .collect(),
    }
});

/// A topic label and the keywords that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicRule {
    pub label: String,
    /// Stored lower-cased; matching is case-insensitive.
    pub keywords: Vec<String>,
}

impl TopicRule {
    pub fn new<S: AsRef<str>>(label: impl Into<String>, keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            label: label.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// TOML file format: an array of `[[topic]]` tables.
#[derive(Debug, Deserialize)]
struct TopicFile {
    #[serde(default)]
    topic: Vec<TopicRule>,
}

/// Ordered, immutable topic rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTable {
    rules: Vec<TopicRule>,
}

impl Default for TopicTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl TopicTable {
    /// The built-in table without cloning it.
    pub fn builtin() -> &'static TopicTable {
        &BUILTIN
    }

    /// Build a table from rules, validating labels and keywords.
    pub fn from_rules(rules: Vec<TopicRule>) -> Result<Self, TopicError> {
        if rules.is_empty() {
            return Err(TopicError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        let mut validated = Vec::with_capacity(rules.len());
        for (index, rule) in rules.into_iter().enumerate() {
            let label = rule.label.trim().to_string();
            if label.is_empty() {
                return Err(TopicError::EmptyLabel { index });
            }
            if !seen.insert(label.clone()) {
                return Err(TopicError::Duplicate { label });
            }
            let keywords: Vec<&str> = rule
                .keywords
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(TopicError::NoKeywords { label });
            }
            validated.push(TopicRule::new(label, keywords));
        }
        Ok(Self { rules: validated })
    }

    /// Parse a table from TOML. Order of `[[topic]]` entries is precedence.
    pub fn from_toml_str(content: &str) -> Result<Self, TopicError> {
        let file: TopicFile = toml::from_str(content)?;
        Self::from_rules(file.topic)
    }

    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }

    /// Classify `text`, returning the first matching label or [`DEFAULT_TOPIC`].
    pub fn classify(&self, text: &str) -> &str {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.label.as_str())
            .unwrap_or(DEFAULT_TOPIC)
    }
}

/// Classify against the built-in table.
pub fn classify(text: &str) -> &'static str {
    TopicTable::builtin().classify(text)
}

#[cfg(test)]
#[path = "tests/topic_tests.rs"]
mod tests;
