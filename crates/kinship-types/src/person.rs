//! People and their biographical attributes.
//!
//! A [`Person`] is an immutable value entity: once constructed it is never
//! mutated. Identity (equality, ordering, hashing) is by [`PersonId`] only;
//! two records with the same id are the same person for graph purposes even
//! when their other attributes differ. [`Person::attributes_match`] exists
//! for the stricter exact comparison.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::ids::PersonId;

/// The gender recorded for a person, used by relation labels and the
/// gender validation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// A male person.
    Male,
    /// A female person.
    Female,
}

impl Gender {
    /// Whether this gender is [`Gender::Male`].
    pub const fn is_male(self) -> bool {
        matches!(self, Self::Male)
    }

    /// The other gender.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// A member of the family graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Identity key; the only field that participates in equality.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Recorded gender.
    pub gender: Gender,
}

impl Person {
    /// Create a person record.
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, age: u32, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age,
            gender,
        }
    }

    /// Exact attribute comparison, stricter than [`PartialEq`].
    ///
    /// Id and name are compared case-insensitively; age and gender must
    /// match exactly.
    pub fn attributes_match(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name.eq_ignore_ascii_case(&other.name)
            && self.age == other.age
            && self.gender == other.gender
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl PartialOrd for Person {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Person {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Person {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}){}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id_only() {
        let a = Person::new("p1", "Amit", 40, Gender::Male);
        let b = Person::new("P1", "Someone Else", 12, Gender::Female);
        assert_eq!(a, b);
    }

    #[test]
    fn attributes_match_is_strict() {
        let a = Person::new("p1", "Amit", 40, Gender::Male);
        let same = Person::new("P1", "AMIT", 40, Gender::Male);
        let aged = Person::new("p1", "Amit", 41, Gender::Male);
        assert!(a.attributes_match(&same));
        assert!(!a.attributes_match(&aged));
    }

    #[test]
    fn gender_opposite_is_involutive() {
        assert_eq!(Gender::Male.opposite(), Gender::Female);
        assert_eq!(Gender::Female.opposite().opposite(), Gender::Female);
        assert!(Gender::Male.is_male());
        assert!(!Gender::Female.is_male());
    }

    #[test]
    fn display_shows_id_and_name() {
        let p = Person::new("p1", "Amit", 40, Gender::Male);
        assert_eq!(p.to_string(), "(p1)Amit");
    }
}
