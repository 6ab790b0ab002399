use core::fmt;
use std::sync::Arc;

/// Canonical identifier of a state, used as the join key across all sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Arc<str>);

impl StateKey {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key.trim()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Normalize a label for key lookups.
///
/// Labels are trimmed, lowercased, and runs of inner whitespace collapse to a single space,
/// so `"  New   York "` and `"new york"` resolve to the same state.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    let mut normalized = String::with_capacity(label.len());
    for word in label.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(word.chars().flat_map(char::to_lowercase));
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        assert_eq!(StateKey::new("  CA ").as_str(), "CA");
    }

    #[test]
    fn test_normalize_label_collapses_whitespace() {
        assert_eq!(normalize_label("  New   York "), "new york");
    }

    #[test]
    fn test_normalize_label_empty() {
        assert_eq!(normalize_label("   "), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(StateKey::new("washington_dc").to_string(), "washington_dc");
    }
}
