//! Directed, labeled connections between two people.
//!
//! A [`ConnectionEdge`] records that `from` stands in relation `kind` to
//! `to`, together with the signed generation delta along that edge. The
//! edge `(A, PARENT, B, 1)` reads "A is B's parent". The graph stores every
//! accepted connection as a mirrored pair: the forward edge plus its
//! [`ConnectionEdge::mirrored`] counterpart.

use serde::{Deserialize, Serialize};

use crate::ids::PersonId;
use crate::relation::RelationKind;

/// One directed relationship edge. Equality is structural over all four
/// fields, so adjacency sets may hold several distinct edges between the
/// same pair of people.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConnectionEdge {
    /// The person the relation is asserted of.
    pub from: PersonId,
    /// The relationship `from` has to `to`.
    pub kind: RelationKind,
    /// The person the relation points at.
    pub to: PersonId,
    /// Signed generation delta from `from` down to `to`.
    pub level: i32,
}

impl ConnectionEdge {
    /// Create an edge with an explicit generation level.
    pub fn new(from: impl Into<PersonId>, kind: RelationKind, to: impl Into<PersonId>, level: i32) -> Self {
        Self {
            from: from.into(),
            kind,
            to: to.into(),
            level,
        }
    }

    /// Create a direct edge whose level is the kind's own generation offset.
    pub fn direct(from: impl Into<PersonId>, kind: RelationKind, to: impl Into<PersonId>) -> Self {
        Self::new(from, kind, to, kind.generation_level())
    }

    /// The same connection seen from the other end: endpoints swapped,
    /// kind reversed, level negated.
    pub fn mirrored(&self) -> Self {
        Self {
            from: self.to.clone(),
            kind: self.kind.reverse(),
            to: self.from.clone(),
            level: self.level.saturating_neg(),
        }
    }
}

impl core::fmt::Display for ConnectionEdge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} --{}({})--> {}", self.from, self.kind, self.level, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_swaps_reverses_and_negates() {
        let edge = ConnectionEdge::direct("a", RelationKind::Parent, "b");
        let mirror = edge.mirrored();
        assert_eq!(
            mirror,
            ConnectionEdge::new("b", RelationKind::Child, "a", -1),
        );
        assert_eq!(mirror.mirrored(), edge);
    }

    #[test]
    fn equality_is_structural() {
        let a = ConnectionEdge::new("a", RelationKind::Grandparent, "b", 2);
        let b = ConnectionEdge::new("A", RelationKind::Grandparent, "B", 2);
        let deeper = ConnectionEdge::new("a", RelationKind::Grandparent, "b", 3);
        assert_eq!(a, b);
        assert_ne!(a, deeper);
    }

    #[test]
    fn direct_uses_kind_level() {
        let edge = ConnectionEdge::direct("a", RelationKind::Grandchild, "b");
        assert_eq!(edge.level, -2);
    }

    #[test]
    fn display_is_readable() {
        let edge = ConnectionEdge::direct("a", RelationKind::Spouse, "b");
        assert_eq!(edge.to_string(), "a --SPOUSE(0)--> b");
    }

    #[test]
    fn serde_round_trip() {
        let edge = ConnectionEdge::direct("a", RelationKind::Kin, "b");
        let json = serde_json::to_string(&edge).ok();
        let back: Option<ConnectionEdge> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(back, Some(edge));
    }
}
