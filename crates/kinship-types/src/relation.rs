//! Relationship kinds and their gender-specific labels.
//!
//! [`RelationKind`] is the closed set of nine coarse relationship
//! categories the graph reasons about. Each kind carries a signed
//! generation offset, a reverse kind (the label seen from the other end of
//! an edge), an alternate kind (the coarser equivalence class used by the
//! consistency validator), and a pair of gender-specific labels.
//!
//! [`SpecificRelation`] is the finer, gender-bound vocabulary (FATHER,
//! AUNT, HUSBAND, ...). It carries no semantics of its own beyond the
//! [`RelationKind`] it delegates to and the gender it implies; it exists
//! for human-readable input/output and the gender validation stage.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::person::Gender;

/// A token that matched neither a generic kind nor a specific label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation token `{token}`")]
pub struct ParseRelationError {
    /// The token that failed to parse.
    pub token: String,
}

// ---------------------------------------------------------------------------
// RelationKind
// ---------------------------------------------------------------------------

/// One of the nine generic relationship categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// One generation up (father/mother).
    Parent,
    /// One generation down (son/daughter).
    Child,
    /// Same generation, shared parent (brother/sister).
    Sibling,
    /// Same generation, married (husband/wife).
    Spouse,
    /// One generation up, not a parent (uncle/aunt).
    Kin,
    /// One generation down, not a child (nephew/niece).
    Nibling,
    /// Same generation, shared grandparent or further.
    Cousin,
    /// Two or more generations up.
    Grandparent,
    /// Two or more generations down.
    Grandchild,
}

impl RelationKind {
    /// Every kind, in declaration order. Used by table-law tests.
    pub const ALL: [Self; 9] = [
        Self::Parent,
        Self::Child,
        Self::Sibling,
        Self::Spouse,
        Self::Kin,
        Self::Nibling,
        Self::Cousin,
        Self::Grandparent,
        Self::Grandchild,
    ];

    /// Signed generation offset this kind implies for a direct edge.
    pub const fn generation_level(self) -> i32 {
        match self {
            Self::Parent | Self::Kin => 1,
            Self::Child | Self::Nibling => -1,
            Self::Sibling | Self::Spouse | Self::Cousin => 0,
            Self::Grandparent => 2,
            Self::Grandchild => -2,
        }
    }

    /// The kind obtained by inverting edge direction.
    ///
    /// Always an involution: `k.reverse().reverse() == k`.
    pub const fn reverse(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Kin => Self::Nibling,
            Self::Nibling => Self::Kin,
            Self::Grandparent => Self::Grandchild,
            Self::Grandchild => Self::Grandparent,
            Self::Sibling => Self::Sibling,
            Self::Spouse => Self::Spouse,
            Self::Cousin => Self::Cousin,
        }
    }

    /// The coarser equivalence class used by the consistency validator.
    ///
    /// Idempotent but not injective: PARENT and KIN both alias to PARENT,
    /// CHILD and NIBLING to CHILD, SIBLING and COUSIN to COUSIN. Never
    /// consulted during traversal composition.
    pub const fn alternate(self) -> Self {
        match self {
            Self::Parent | Self::Kin => Self::Parent,
            Self::Child | Self::Nibling => Self::Child,
            Self::Sibling | Self::Cousin => Self::Cousin,
            Self::Spouse => Self::Spouse,
            Self::Grandparent => Self::Grandparent,
            Self::Grandchild => Self::Grandchild,
        }
    }

    /// The gender-specific label under this kind.
    ///
    /// COUSIN is gender-neutral and yields the same label for both genders.
    pub const fn specific(self, gender: Gender) -> SpecificRelation {
        match (self, gender) {
            (Self::Parent, Gender::Male) => SpecificRelation::Father,
            (Self::Parent, Gender::Female) => SpecificRelation::Mother,
            (Self::Child, Gender::Male) => SpecificRelation::Son,
            (Self::Child, Gender::Female) => SpecificRelation::Daughter,
            (Self::Sibling, Gender::Male) => SpecificRelation::Brother,
            (Self::Sibling, Gender::Female) => SpecificRelation::Sister,
            (Self::Spouse, Gender::Male) => SpecificRelation::Husband,
            (Self::Spouse, Gender::Female) => SpecificRelation::Wife,
            (Self::Kin, Gender::Male) => SpecificRelation::Uncle,
            (Self::Kin, Gender::Female) => SpecificRelation::Aunt,
            (Self::Nibling, Gender::Male) => SpecificRelation::Nephew,
            (Self::Nibling, Gender::Female) => SpecificRelation::Niece,
            (Self::Grandparent, Gender::Male) => SpecificRelation::Grandfather,
            (Self::Grandparent, Gender::Female) => SpecificRelation::Grandmother,
            (Self::Grandchild, Gender::Male) => SpecificRelation::Grandson,
            (Self::Grandchild, Gender::Female) => SpecificRelation::Granddaughter,
            (Self::Cousin, _) => SpecificRelation::Cousin,
        }
    }

    /// Canonical uppercase token, matching what [`FromStr`] accepts.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Parent => "PARENT",
            Self::Child => "CHILD",
            Self::Sibling => "SIBLING",
            Self::Spouse => "SPOUSE",
            Self::Kin => "KIN",
            Self::Nibling => "NIBLING",
            Self::Cousin => "COUSIN",
            Self::Grandparent => "GRANDPARENT",
            Self::Grandchild => "GRANDCHILD",
        }
    }
}

impl core::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for RelationKind {
    type Err = ParseRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseRelationError {
                token: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// SpecificRelation
// ---------------------------------------------------------------------------

/// A gender-bound relationship label under one [`RelationKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecificRelation {
    /// Male PARENT.
    Father,
    /// Female PARENT.
    Mother,
    /// Male CHILD.
    Son,
    /// Female CHILD.
    Daughter,
    /// Male SIBLING.
    Brother,
    /// Female SIBLING.
    Sister,
    /// Male SPOUSE.
    Husband,
    /// Female SPOUSE.
    Wife,
    /// Male KIN.
    Uncle,
    /// Female KIN.
    Aunt,
    /// Male NIBLING.
    Nephew,
    /// Female NIBLING.
    Niece,
    /// Male GRANDPARENT.
    Grandfather,
    /// Female GRANDPARENT.
    Grandmother,
    /// Male GRANDCHILD.
    Grandson,
    /// Female GRANDCHILD.
    Granddaughter,
    /// Gender-neutral COUSIN.
    Cousin,
}

impl SpecificRelation {
    /// Every label, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Father,
        Self::Mother,
        Self::Son,
        Self::Daughter,
        Self::Brother,
        Self::Sister,
        Self::Husband,
        Self::Wife,
        Self::Uncle,
        Self::Aunt,
        Self::Nephew,
        Self::Niece,
        Self::Grandfather,
        Self::Grandmother,
        Self::Grandson,
        Self::Granddaughter,
        Self::Cousin,
    ];

    /// The generic kind this label belongs to.
    pub const fn kind(self) -> RelationKind {
        match self {
            Self::Father | Self::Mother => RelationKind::Parent,
            Self::Son | Self::Daughter => RelationKind::Child,
            Self::Brother | Self::Sister => RelationKind::Sibling,
            Self::Husband | Self::Wife => RelationKind::Spouse,
            Self::Uncle | Self::Aunt => RelationKind::Kin,
            Self::Nephew | Self::Niece => RelationKind::Nibling,
            Self::Grandfather | Self::Grandmother => RelationKind::Grandparent,
            Self::Grandson | Self::Granddaughter => RelationKind::Grandchild,
            Self::Cousin => RelationKind::Cousin,
        }
    }

    /// The gender this label implies, `None` for the neutral COUSIN.
    pub const fn gender(self) -> Option<Gender> {
        match self {
            Self::Father
            | Self::Son
            | Self::Brother
            | Self::Husband
            | Self::Uncle
            | Self::Nephew
            | Self::Grandfather
            | Self::Grandson => Some(Gender::Male),
            Self::Mother
            | Self::Daughter
            | Self::Sister
            | Self::Wife
            | Self::Aunt
            | Self::Niece
            | Self::Grandmother
            | Self::Granddaughter => Some(Gender::Female),
            Self::Cousin => None,
        }
    }

    /// Canonical uppercase token, matching what [`FromStr`] accepts.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Father => "FATHER",
            Self::Mother => "MOTHER",
            Self::Son => "SON",
            Self::Daughter => "DAUGHTER",
            Self::Brother => "BROTHER",
            Self::Sister => "SISTER",
            Self::Husband => "HUSBAND",
            Self::Wife => "WIFE",
            Self::Uncle => "UNCLE",
            Self::Aunt => "AUNT",
            Self::Nephew => "NEPHEW",
            Self::Niece => "NIECE",
            Self::Grandfather => "GRANDFATHER",
            Self::Grandmother => "GRANDMOTHER",
            Self::Grandson => "GRANDSON",
            Self::Granddaughter => "GRANDDAUGHTER",
            Self::Cousin => "COUSIN",
        }
    }
}

impl core::fmt::Display for SpecificRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for SpecificRelation {
    type Err = ParseRelationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.token().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseRelationError {
                token: s.to_owned(),
            })
    }
}

// ---------------------------------------------------------------------------
// RelationInput
// ---------------------------------------------------------------------------

/// A relation as named by a caller: either the generic kind or a
/// gender-specific label. Free-text connect and query operations accept
/// both spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationInput {
    /// A generic kind, e.g. `PARENT`.
    Generic(RelationKind),
    /// A gender-specific label, e.g. `FATHER`.
    Specific(SpecificRelation),
}

impl RelationInput {
    /// The generic kind named either directly or through the label.
    pub const fn kind(self) -> RelationKind {
        match self {
            Self::Generic(kind) => kind,
            Self::Specific(label) => label.kind(),
        }
    }

    /// The gender implied by the spelling, if any.
    ///
    /// Generic spellings and the neutral COUSIN label imply none.
    pub const fn gender(self) -> Option<Gender> {
        match self {
            Self::Generic(_) => None,
            Self::Specific(label) => label.gender(),
        }
    }

    /// The specific label, when the input used one.
    pub const fn label(self) -> Option<SpecificRelation> {
        match self {
            Self::Generic(_) => None,
            Self::Specific(label) => Some(label),
        }
    }
}

impl FromStr for RelationInput {
    type Err = ParseRelationError;

    /// Case-insensitive parse trying the generic spelling first.
    ///
    /// `COUSIN` is both a kind token and a label token; the generic
    /// reading wins, which is harmless since the label is gender-neutral
    /// and delegates straight back to the kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(kind) = s.parse::<RelationKind>() {
            return Ok(Self::Generic(kind));
        }
        s.parse::<SpecificRelation>().map(Self::Specific)
    }
}

impl core::fmt::Display for RelationInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Generic(kind) => write!(f, "{kind}"),
            Self::Specific(label) => write!(f, "{label}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_an_involution() {
        for kind in RelationKind::ALL {
            assert_eq!(kind.reverse().reverse(), kind);
        }
    }

    #[test]
    fn alternate_is_idempotent() {
        for kind in RelationKind::ALL {
            assert_eq!(kind.alternate().alternate(), kind.alternate());
        }
    }

    #[test]
    fn reverse_negates_generation_level() {
        for kind in RelationKind::ALL {
            assert_eq!(
                kind.reverse().generation_level(),
                kind.generation_level().saturating_neg(),
            );
        }
    }

    #[test]
    fn generation_levels_match_kind_semantics() {
        assert_eq!(RelationKind::Parent.generation_level(), 1);
        assert_eq!(RelationKind::Child.generation_level(), -1);
        assert_eq!(RelationKind::Grandparent.generation_level(), 2);
        assert_eq!(RelationKind::Grandchild.generation_level(), -2);
        assert_eq!(RelationKind::Kin.generation_level(), 1);
        assert_eq!(RelationKind::Nibling.generation_level(), -1);
        assert_eq!(RelationKind::Spouse.generation_level(), 0);
    }

    #[test]
    fn specific_labels_round_trip_to_their_kind() {
        for label in SpecificRelation::ALL {
            if let Some(gender) = label.gender() {
                assert_eq!(label.kind().specific(gender), label);
            }
        }
        assert_eq!(
            RelationKind::Cousin.specific(Gender::Male),
            SpecificRelation::Cousin,
        );
        assert_eq!(
            RelationKind::Cousin.specific(Gender::Female),
            SpecificRelation::Cousin,
        );
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!("parent".parse(), Ok(RelationKind::Parent));
        assert_eq!("GRANDCHILD".parse(), Ok(RelationKind::Grandchild));
        assert_eq!("Aunt".parse(), Ok(SpecificRelation::Aunt));
        assert_eq!("wife".parse(), Ok(SpecificRelation::Wife));
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        let err = "stepmother".parse::<RelationInput>();
        assert_eq!(
            err,
            Err(ParseRelationError {
                token: String::from("stepmother"),
            }),
        );
    }

    #[test]
    fn relation_input_accepts_both_spellings() {
        assert_eq!(
            "father".parse(),
            Ok(RelationInput::Specific(SpecificRelation::Father)),
        );
        assert_eq!(
            "PARENT".parse(),
            Ok(RelationInput::Generic(RelationKind::Parent)),
        );
        let input: RelationInput = match "father".parse() {
            Ok(parsed) => parsed,
            Err(_) => RelationInput::Generic(RelationKind::Cousin),
        };
        assert_eq!(input.kind(), RelationKind::Parent);
        assert_eq!(input.gender(), Some(Gender::Male));
    }

    #[test]
    fn cousin_token_reads_as_generic() {
        assert_eq!(
            "cousin".parse(),
            Ok(RelationInput::Generic(RelationKind::Cousin)),
        );
    }

    #[test]
    fn display_matches_canonical_token() {
        assert_eq!(RelationKind::Nibling.to_string(), "NIBLING");
        assert_eq!(SpecificRelation::Granddaughter.to_string(), "GRANDDAUGHTER");
    }

    #[test]
    fn kind_serde_round_trip() {
        let json = serde_json::to_string(&RelationKind::Grandparent).ok();
        let back: Option<RelationKind> =
            json.as_deref().and_then(|j| serde_json::from_str(j).ok());
        assert_eq!(back, Some(RelationKind::Grandparent));
    }
}
