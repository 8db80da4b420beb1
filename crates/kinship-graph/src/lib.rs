//! The kinship relationship engine.
//!
//! This crate holds all the graph logic: storing family members and their
//! direct connections, deriving indirect relations by composing edges along
//! breadth-first walks, validating new connections, and answering queries
//! over the family. It sits on top of `kinship-types` (which defines the
//! value types) and performs no I/O, so REST or persistence layers can wrap
//! it without the engine knowing about them.
//!
//! # Modules
//!
//! - [`compose`] -- The relation composition table ([`compose::compose`])
//! - [`error`] -- Error type for all graph operations ([`GraphError`])
//! - [`filters`] -- Query helpers: generations, genders, roles
//! - [`graph`] -- The graph itself ([`FamilyGraph`]): connections, traversal, memoization
//! - [`validation`] -- The staged connection validator ([`ValidatorPipeline`])

pub mod compose;
pub mod error;
pub mod filters;
pub mod graph;
pub mod validation;

// Re-export primary types at crate root for convenience.
pub use compose::compose;
pub use error::GraphError;
pub use graph::FamilyGraph;
pub use validation::{
    ClaimRejection, ConnectionLookup, RelationClaim, ValidationStage, ValidatorPipeline,
    validate_age, validate_consistency, validate_gender,
};
