//! Error types for the kinship-graph crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Every failure is local and synchronous; a rejected connect leaves the
//! graph unmodified (validation runs before any insertion).
//!
//! Errors derive [`PartialEq`] so tests can assert on whole `Result`
//! values directly.

use kinship_types::{ConnectionEdge, ParseRelationError, PersonId};

use crate::validation::ClaimRejection;

/// Errors that can occur during family graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The given id or person reference is not in the graph's person map.
    #[error("person with id `{0}` is not present in the family")]
    UnknownPerson(PersonId),

    /// The validator pipeline rejected a proposed direct connection.
    #[error("rejected connection {claim}: {rejection}")]
    InvalidRelation {
        /// The edge that was proposed.
        claim: ConnectionEdge,
        /// The first stage rejection the pipeline produced.
        rejection: ClaimRejection,
    },

    /// Disconnection was requested for a pair with no direct edge.
    #[error("{from} is not directly connected to {to}")]
    NotConnected {
        /// The person the removal started from.
        from: PersonId,
        /// The person the missing edge should point at.
        to: PersonId,
    },

    /// A free-text relation token matched no known kind or label.
    #[error(transparent)]
    UnparseableRelation(#[from] ParseRelationError),
}
