//! The relation composition table.
//!
//! [`compose`] answers: when a traversal already knows the `prior` relation
//! from the source to some person, and now follows an edge of kind
//! `current` out of that person, what single relation describes the source
//! against the new endpoint?
//!
//! The mapping is an explicit 9x9 table rather than generation-level
//! arithmetic, because the result is not a pure function of level: SPOUSE
//! composed onto PARENT yields KIN, not PARENT. Composition is neither
//! commutative nor associative; traversal folds chains strictly in
//! discovery order.
//!
//! One entry is a documented approximation: following CHILD after a prior
//! KIN could denote either COUSIN or SIBLING depending on which sibling of
//! the parent the KIN edge went through, and that context is not
//! recoverable here. The table answers COUSIN.

use kinship_types::RelationKind;

/// Compose the relation of the edge being traversed (`current`) onto the
/// relation already established from the source (`prior`).
#[allow(clippy::too_many_lines)]
pub const fn compose(current: RelationKind, prior: RelationKind) -> RelationKind {
    use RelationKind::{
        Child, Cousin, Grandchild, Grandparent, Kin, Nibling, Parent, Sibling, Spouse,
    };

    match (current, prior) {
        // --- following a PARENT edge ---
        (Parent, Parent | Kin | Grandparent) => Grandparent,
        (Parent, Child) => Sibling,
        (Parent, Nibling) => Cousin,
        (Parent, Spouse) => Parent,
        (Parent, Sibling | Cousin) => Kin,
        (Parent, Grandchild) => Nibling,

        // --- following a KIN edge ---
        (Kin, Parent | Kin | Grandparent) => Grandparent,
        (Kin, Child | Nibling) => Cousin,
        (Kin, Spouse | Sibling | Cousin) => Kin,
        (Kin, Grandchild) => Nibling,

        // --- following a CHILD edge ---
        (Child, Parent) => Spouse,
        (Child, Child | Nibling | Grandchild) => Grandchild,
        // Ambiguous without more context; could equally be SIBLING.
        (Child, Kin) => Cousin,
        (Child, Spouse | Cousin) => Nibling,
        (Child, Sibling) => Child,
        (Child, Grandparent) => Kin,

        // --- following a NIBLING edge ---
        (Nibling, Parent | Kin) => Cousin,
        (Nibling, Child | Nibling | Grandchild) => Grandchild,
        (Nibling, Spouse | Sibling | Cousin) => Nibling,
        (Nibling, Grandparent) => Kin,

        // --- following a GRANDPARENT edge ---
        (Grandparent, Parent | Kin | Grandparent | Sibling | Spouse | Cousin) => Grandparent,
        (Grandparent, Child | Nibling) => Kin,
        (Grandparent, Grandchild) => Cousin,

        // --- following a GRANDCHILD edge ---
        (Grandchild, Parent | Kin) => Nibling,
        (Grandchild, Child | Nibling | Grandchild | Spouse | Sibling | Cousin) => Grandchild,
        (Grandchild, Grandparent) => Cousin,

        // --- following a SPOUSE edge ---
        (Spouse, Parent) => Kin,
        (Spouse, Child) => Child,
        (Spouse, Nibling) => Nibling,
        (Spouse, Grandparent) => Grandparent,
        (Spouse, Grandchild) => Grandchild,
        (Spouse, Kin) => Kin,
        (Spouse, Cousin) => Cousin,
        (Spouse, Spouse | Sibling) => Cousin,

        // --- following a SIBLING edge ---
        (Sibling, Parent) => Parent,
        (Sibling, Nibling) => Nibling,
        (Sibling, Kin) => Kin,
        (Sibling, Grandparent) => Grandparent,
        (Sibling, Grandchild) => Grandchild,
        (Sibling, Cousin) => Cousin,
        (Sibling, Sibling) => Sibling,
        (Sibling, Child) => Nibling,
        (Sibling, Spouse) => Cousin,

        // --- following a COUSIN edge ---
        (Cousin, Grandparent) => Grandparent,
        (Cousin, Grandchild) => Grandchild,
        (Cousin, Kin) => Kin,
        (Cousin, Nibling) => Nibling,
        (Cousin, Parent) => Kin,
        (Cousin, Child) => Nibling,
        (Cousin, Spouse | Sibling | Cousin) => Cousin,
    }
}
