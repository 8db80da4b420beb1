//! Shared type definitions for the kinship graph engine.
//!
//! This crate is the single source of truth for the value types the engine
//! operates on. It contains no graph logic; traversal, composition, and
//! validation live in `kinship-graph`.
//!
//! # Modules
//!
//! - [`ids`] -- Case-insensitive person identifiers ([`PersonId`])
//! - [`person`] -- People and their biographical attributes ([`Person`], [`Gender`])
//! - [`relation`] -- Relationship kinds, gender-specific labels, parsing
//! - [`edge`] -- Directed, labeled connection edges ([`ConnectionEdge`])

pub mod edge;
pub mod ids;
pub mod person;
pub mod relation;

// Re-export all public types at crate root for convenience.
pub use edge::ConnectionEdge;
pub use ids::PersonId;
pub use person::{Gender, Person};
pub use relation::{ParseRelationError, RelationInput, RelationKind, SpecificRelation};
