//! The connection validation pipeline.
//!
//! Every proposed direct connection runs through an ordered chain of
//! stages before it is stored. The stages run in a fixed order — gender,
//! age, consistency — and short-circuit on the first rejection. Each stage
//! is a plain function, so the chain can be reordered or extended without
//! touching the others, and each is testable in isolation.
//!
//! Only the consistency stage needs to see the rest of the graph; it reads
//! it through the narrow [`ConnectionLookup`] trait so tests can hand it a
//! stub instead of a real [`FamilyGraph`](crate::FamilyGraph).

use kinship_types::{ConnectionEdge, Person, PersonId, RelationKind, SpecificRelation};

/// Why a stage vetoed a proposed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClaimRejection {
    /// SPOUSE (or HUSBAND/WIFE) between two people of the same gender.
    #[error("spouses must be of opposite genders")]
    SpouseGender,

    /// A gender-specific label whose gender is not the claimant's.
    #[error("the relation label does not match the claimant's gender")]
    LabelGender,

    /// An ancestor-class claim where the claimant is not older.
    #[error("an ancestor-class relation requires the claimant to be older")]
    AgeOrderAncestor,

    /// A descendant-class claim where the claimant is not younger.
    #[error("a descendant-class relation requires the claimant to be younger")]
    AgeOrderDescendant,

    /// The claim contradicts a connection the graph can already infer.
    #[error("the claim conflicts with an already established connection")]
    ConflictingConnection,
}

/// A proposed direct connection, as seen by the validation stages.
#[derive(Debug, Clone, Copy)]
pub struct RelationClaim<'a> {
    /// The person the relation is asserted of.
    pub claimant: &'a Person,
    /// The generic kind being claimed.
    pub kind: RelationKind,
    /// The gender-specific label, when the claim used one.
    pub label: Option<SpecificRelation>,
    /// The person the relation points at.
    pub target: &'a Person,
    /// The claimed generation level.
    pub level: i32,
}

/// Read access to already-established connections.
///
/// The consistency stage is the only consumer. [`FamilyGraph`] implements
/// this with a non-memoizing traversal; tests implement it with canned
/// answers.
///
/// [`FamilyGraph`]: crate::FamilyGraph
pub trait ConnectionLookup {
    /// The connection (direct or inferred) between two people, if any.
    fn existing_connection(&self, from: &PersonId, to: &PersonId) -> Option<ConnectionEdge>;
}

/// One stage of the pipeline: veto or pass a claim.
pub type ValidationStage =
    fn(&RelationClaim<'_>, &dyn ConnectionLookup) -> Result<(), ClaimRejection>;

/// Gender stage.
///
/// A gender-specific label must match the claimant's own gender, and
/// SPOUSE claims require the two people to differ in gender.
pub fn validate_gender(
    claim: &RelationClaim<'_>,
    _graph: &dyn ConnectionLookup,
) -> Result<(), ClaimRejection> {
    if let Some(label_gender) = claim.label.and_then(SpecificRelation::gender)
        && label_gender != claim.claimant.gender
    {
        return Err(ClaimRejection::LabelGender);
    }
    if claim.kind == RelationKind::Spouse && claim.claimant.gender == claim.target.gender {
        return Err(ClaimRejection::SpouseGender);
    }
    Ok(())
}

/// Age stage.
///
/// Ancestor-class kinds (PARENT, KIN, GRANDPARENT) require the claimant to
/// be strictly older; descendant-class kinds (CHILD, NIBLING, GRANDCHILD)
/// strictly younger. Same-generation kinds carry no age constraint.
pub fn validate_age(
    claim: &RelationClaim<'_>,
    _graph: &dyn ConnectionLookup,
) -> Result<(), ClaimRejection> {
    match claim.kind {
        RelationKind::Parent | RelationKind::Kin | RelationKind::Grandparent => {
            if claim.claimant.age > claim.target.age {
                Ok(())
            } else {
                Err(ClaimRejection::AgeOrderAncestor)
            }
        }
        RelationKind::Child | RelationKind::Nibling | RelationKind::Grandchild => {
            if claim.claimant.age < claim.target.age {
                Ok(())
            } else {
                Err(ClaimRejection::AgeOrderDescendant)
            }
        }
        RelationKind::Sibling | RelationKind::Spouse | RelationKind::Cousin => Ok(()),
    }
}

/// Consistency stage.
///
/// A first-ever claim between two people passes. Otherwise the claim must
/// agree with what the graph already infers: the kind must equal the
/// existing kind or its alternate class, and the level must match —
/// exactly for most kinds, but GRANDPARENT admits any level at or above
/// the existing one and GRANDCHILD any level at or below, since those two
/// read as "at least N generations up/down".
pub fn validate_consistency(
    claim: &RelationClaim<'_>,
    graph: &dyn ConnectionLookup,
) -> Result<(), ClaimRejection> {
    let Some(existing) = graph.existing_connection(&claim.claimant.id, &claim.target.id) else {
        return Ok(());
    };
    let level_ok = match claim.kind {
        RelationKind::Grandparent => claim.level >= existing.level,
        RelationKind::Grandchild => claim.level <= existing.level,
        _ => claim.level == existing.level,
    };
    let kind_ok = claim.kind == existing.kind || claim.kind.alternate() == existing.kind;
    if level_ok && kind_ok {
        Ok(())
    } else {
        Err(ClaimRejection::ConflictingConnection)
    }
}

/// The ordered validation chain run before a direct connection is stored.
#[derive(Debug, Clone)]
pub struct ValidatorPipeline {
    stages: Vec<ValidationStage>,
}

impl ValidatorPipeline {
    /// The standard chain: gender, then age, then consistency.
    pub fn standard() -> Self {
        Self::new(vec![validate_gender, validate_age, validate_consistency])
    }

    /// A pipeline with a caller-chosen stage list.
    pub const fn new(stages: Vec<ValidationStage>) -> Self {
        Self { stages }
    }

    /// Run every stage in order, short-circuiting on the first rejection.
    pub fn validate(
        &self,
        claim: &RelationClaim<'_>,
        graph: &dyn ConnectionLookup,
    ) -> Result<(), ClaimRejection> {
        for stage in &self.stages {
            stage(claim, graph)?;
        }
        Ok(())
    }
}

impl Default for ValidatorPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use kinship_types::Gender;

    use super::*;

    /// A lookup that answers every pair with the same canned connection.
    struct StubLookup(Option<ConnectionEdge>);

    impl ConnectionLookup for StubLookup {
        fn existing_connection(&self, _from: &PersonId, _to: &PersonId) -> Option<ConnectionEdge> {
            self.0.clone()
        }
    }

    fn unconnected() -> StubLookup {
        StubLookup(None)
    }

    fn claim<'a>(
        claimant: &'a Person,
        kind: RelationKind,
        target: &'a Person,
    ) -> RelationClaim<'a> {
        RelationClaim {
            claimant,
            kind,
            label: None,
            target,
            level: kind.generation_level(),
        }
    }

    // -----------------------------------------------------------------------
    // Gender stage
    // -----------------------------------------------------------------------

    #[test]
    fn spouse_same_gender_rejected() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 38, Gender::Male);
        let result = validate_gender(&claim(&a, RelationKind::Spouse, &b), &unconnected());
        assert_eq!(result, Err(ClaimRejection::SpouseGender));
    }

    #[test]
    fn spouse_opposite_gender_passes() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 38, Gender::Female);
        let result = validate_gender(&claim(&a, RelationKind::Spouse, &b), &unconnected());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn label_gender_must_match_claimant() {
        let a = Person::new("a", "A", 40, Gender::Female);
        let b = Person::new("b", "B", 10, Gender::Male);
        let mut c = claim(&a, RelationKind::Parent, &b);
        c.label = Some(SpecificRelation::Father);
        assert_eq!(
            validate_gender(&c, &unconnected()),
            Err(ClaimRejection::LabelGender),
        );
        c.label = Some(SpecificRelation::Mother);
        assert_eq!(validate_gender(&c, &unconnected()), Ok(()));
    }

    #[test]
    fn husband_label_requires_opposite_genders() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 38, Gender::Male);
        let mut c = claim(&a, RelationKind::Spouse, &b);
        c.label = Some(SpecificRelation::Husband);
        assert_eq!(
            validate_gender(&c, &unconnected()),
            Err(ClaimRejection::SpouseGender),
        );
    }

    #[test]
    fn neutral_cousin_label_passes_either_gender() {
        let a = Person::new("a", "A", 40, Gender::Female);
        let b = Person::new("b", "B", 41, Gender::Male);
        let mut c = claim(&a, RelationKind::Cousin, &b);
        c.label = Some(SpecificRelation::Cousin);
        assert_eq!(validate_gender(&c, &unconnected()), Ok(()));
    }

    // -----------------------------------------------------------------------
    // Age stage
    // -----------------------------------------------------------------------

    #[test]
    fn parent_must_be_older() {
        let young = Person::new("a", "A", 10, Gender::Male);
        let old = Person::new("b", "B", 40, Gender::Male);
        assert_eq!(
            validate_age(&claim(&young, RelationKind::Parent, &old), &unconnected()),
            Err(ClaimRejection::AgeOrderAncestor),
        );
        assert_eq!(
            validate_age(&claim(&old, RelationKind::Parent, &young), &unconnected()),
            Ok(()),
        );
    }

    #[test]
    fn equal_ages_fail_both_vertical_directions() {
        let a = Person::new("a", "A", 30, Gender::Male);
        let b = Person::new("b", "B", 30, Gender::Female);
        assert_eq!(
            validate_age(&claim(&a, RelationKind::Parent, &b), &unconnected()),
            Err(ClaimRejection::AgeOrderAncestor),
        );
        assert_eq!(
            validate_age(&claim(&a, RelationKind::Child, &b), &unconnected()),
            Err(ClaimRejection::AgeOrderDescendant),
        );
    }

    #[test]
    fn grandchild_must_be_younger() {
        let a = Person::new("a", "A", 70, Gender::Male);
        let b = Person::new("b", "B", 20, Gender::Female);
        assert_eq!(
            validate_age(&claim(&a, RelationKind::Grandchild, &b), &unconnected()),
            Err(ClaimRejection::AgeOrderDescendant),
        );
    }

    #[test]
    fn same_generation_kinds_ignore_age() {
        let a = Person::new("a", "A", 70, Gender::Male);
        let b = Person::new("b", "B", 20, Gender::Female);
        for kind in [RelationKind::Spouse, RelationKind::Sibling, RelationKind::Cousin] {
            assert_eq!(validate_age(&claim(&a, kind, &b), &unconnected()), Ok(()));
        }
    }

    // -----------------------------------------------------------------------
    // Consistency stage
    // -----------------------------------------------------------------------

    #[test]
    fn first_claim_between_pair_passes() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 10, Gender::Male);
        assert_eq!(
            validate_consistency(&claim(&a, RelationKind::Parent, &b), &unconnected()),
            Ok(()),
        );
    }

    #[test]
    fn matching_existing_kind_and_level_passes() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 10, Gender::Male);
        let lookup = StubLookup(Some(ConnectionEdge::direct("a", RelationKind::Parent, "b")));
        assert_eq!(
            validate_consistency(&claim(&a, RelationKind::Parent, &b), &lookup),
            Ok(()),
        );
    }

    #[test]
    fn alternate_kind_is_accepted() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 10, Gender::Male);
        // KIN aliases to PARENT, so a KIN claim agrees with an inferred
        // PARENT connection at the same level.
        let lookup = StubLookup(Some(ConnectionEdge::direct("a", RelationKind::Parent, "b")));
        assert_eq!(
            validate_consistency(&claim(&a, RelationKind::Kin, &b), &lookup),
            Ok(()),
        );
    }

    #[test]
    fn conflicting_kind_rejected() {
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 38, Gender::Female);
        let lookup = StubLookup(Some(ConnectionEdge::direct("a", RelationKind::Parent, "b")));
        assert_eq!(
            validate_consistency(&claim(&a, RelationKind::Spouse, &b), &lookup),
            Err(ClaimRejection::ConflictingConnection),
        );
    }

    #[test]
    fn grandparent_level_is_open_ended_upward() {
        let a = Person::new("a", "A", 80, Gender::Male);
        let b = Person::new("b", "B", 10, Gender::Male);
        let lookup = StubLookup(Some(ConnectionEdge::new(
            "a",
            RelationKind::Grandparent,
            "b",
            2,
        )));
        let mut c = claim(&a, RelationKind::Grandparent, &b);
        c.level = 3;
        assert_eq!(validate_consistency(&c, &lookup), Ok(()));
        c.level = 1;
        assert_eq!(
            validate_consistency(&c, &lookup),
            Err(ClaimRejection::ConflictingConnection),
        );
    }

    #[test]
    fn grandchild_level_is_open_ended_downward() {
        let a = Person::new("a", "A", 10, Gender::Male);
        let b = Person::new("b", "B", 80, Gender::Male);
        let lookup = StubLookup(Some(ConnectionEdge::new(
            "a",
            RelationKind::Grandchild,
            "b",
            -2,
        )));
        let mut c = claim(&a, RelationKind::Grandchild, &b);
        c.level = -3;
        assert_eq!(validate_consistency(&c, &lookup), Ok(()));
        c.level = -1;
        assert_eq!(
            validate_consistency(&c, &lookup),
            Err(ClaimRejection::ConflictingConnection),
        );
    }

    // -----------------------------------------------------------------------
    // Pipeline ordering
    // -----------------------------------------------------------------------

    #[test]
    fn pipeline_short_circuits_on_first_rejection() {
        // Same-gender spouse claim with a conflicting existing connection:
        // the gender stage runs first, so its rejection wins.
        let a = Person::new("a", "A", 40, Gender::Male);
        let b = Person::new("b", "B", 10, Gender::Male);
        let lookup = StubLookup(Some(ConnectionEdge::direct("a", RelationKind::Parent, "b")));
        let result = ValidatorPipeline::standard()
            .validate(&claim(&a, RelationKind::Spouse, &b), &lookup);
        assert_eq!(result, Err(ClaimRejection::SpouseGender));
    }

    #[test]
    fn empty_pipeline_accepts_everything() {
        let a = Person::new("a", "A", 10, Gender::Male);
        let b = Person::new("b", "B", 40, Gender::Male);
        let pipeline = ValidatorPipeline::new(Vec::new());
        let result = pipeline.validate(&claim(&a, RelationKind::Parent, &b), &unconnected());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn reordered_pipeline_reports_its_first_stage() {
        let a = Person::new("a", "A", 10, Gender::Male);
        let b = Person::new("b", "B", 40, Gender::Male);
        // Age first: the age rejection surfaces instead of the gender one.
        let pipeline = ValidatorPipeline::new(vec![validate_age, validate_gender]);
        let mut c = claim(&a, RelationKind::Parent, &b);
        c.label = Some(SpecificRelation::Mother);
        assert_eq!(
            pipeline.validate(&c, &unconnected()),
            Err(ClaimRejection::AgeOrderAncestor),
        );
    }
}
