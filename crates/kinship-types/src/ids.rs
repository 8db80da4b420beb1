//! Case-insensitive person identifiers.
//!
//! A [`PersonId`] preserves the spelling it was created with, but equality,
//! ordering, and hashing all operate on the case-folded form: `"Alice"`,
//! `"alice"`, and `"ALICE"` identify the same person. The folded form is the
//! identity key used by the graph's person map and adjacency map.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Unique identifier for a person in the family graph.
///
/// Comparison is case-insensitive; the original spelling is kept for
/// display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded characters, the basis for equality and ordering.
    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for PersonId {
    fn eq(&self, other: &Self) -> bool {
        self.folded().eq(other.folded())
    }
}

impl Eq for PersonId {}

impl PartialOrd for PersonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PersonId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl Hash for PersonId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.folded() {
            c.hash(state);
        }
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PersonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_case() {
        assert_eq!(PersonId::new("Alice"), PersonId::new("ALICE"));
        assert_eq!(PersonId::new("p1"), PersonId::new("P1"));
        assert_ne!(PersonId::new("alice"), PersonId::new("bob"));
    }

    #[test]
    fn ordering_ignores_case() {
        let a = PersonId::new("ALICE");
        let b = PersonId::new("bob");
        assert!(a < b);
        assert_eq!(a.cmp(&PersonId::new("alice")), Ordering::Equal);
    }

    #[test]
    fn display_preserves_spelling() {
        assert_eq!(PersonId::new("Alice").to_string(), "Alice");
        assert_eq!(PersonId::new("Alice").as_str(), "Alice");
    }

    #[test]
    fn serde_is_transparent() {
        let id = PersonId::new("p42");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"p42\""));
    }
}
