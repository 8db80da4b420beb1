//! Query helpers over a [`FamilyGraph`].
//!
//! These answer "who" questions rather than "how related" questions:
//! everyone at a generation, everyone of a gender, everyone standing in a
//! given relation to a person. They read the derived closure but never
//! memoize, so they leave the graph untouched.

use kinship_types::{ConnectionEdge, Gender, Person, PersonId, RelationInput};

use crate::error::GraphError;
use crate::graph::FamilyGraph;

impl FamilyGraph {
    /// Everyone exactly `generation` levels away from `person`: `1` for
    /// parents and their generation, `2` for grandparents, `-1` for
    /// children, and so on.
    ///
    /// Stored edges point away from `person`, so the queried generation is
    /// the negation of the edge level.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when the id is unregistered.
    pub fn members_at_generation(
        &self,
        person: &PersonId,
        generation: i32,
    ) -> Result<Vec<&Person>, GraphError> {
        let level = generation.saturating_neg();
        let members = self
            .connections_for(person)?
            .into_iter()
            .filter(|edge| edge.level == level)
            .filter_map(|edge| self.person(&edge.to).ok())
            .collect();
        Ok(members)
    }

    /// The whole family ordered by age, ascending or descending. People of
    /// equal age keep their id order.
    #[must_use]
    pub fn members_by_age(&self, ascending: bool) -> Vec<&Person> {
        let mut members: Vec<&Person> = self.persons().collect();
        members.sort_by_key(|person| person.age);
        if !ascending {
            members.reverse();
        }
        members
    }

    /// Every registered person of the given gender, in id order.
    #[must_use]
    pub fn members_of_gender(&self, gender: Gender) -> Vec<&Person> {
        self.persons()
            .filter(|person| person.gender == gender)
            .collect()
    }

    /// Everyone standing in `relation` to `person` at the given level: the
    /// FATHER of someone at level 1, their GRANDPARENTs at level 2, and so
    /// on. A gender-specific spelling restricts the matches to that gender.
    ///
    /// Resolved over the full closure through the reverse relation, since
    /// an edge stored from `person` describes what `person` is to the
    /// other end.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when the id is unregistered.
    pub fn persons_by_relation(
        &self,
        person: &PersonId,
        relation: RelationInput,
        level: i32,
    ) -> Result<Vec<&Person>, GraphError> {
        let reverse = relation.kind().reverse();
        let reverse_level = level.saturating_neg();
        let members = self
            .connections_for(person)?
            .into_iter()
            .filter(|edge| edge.level == reverse_level && edge.kind == reverse)
            .filter_map(|edge| self.person(&edge.to).ok())
            .filter(|member| {
                relation
                    .gender()
                    .is_none_or(|gender| member.gender == gender)
            })
            .collect();
        Ok(members)
    }

    /// Whether `person` plays the role `relation` toward anyone at the
    /// given level. A gender-specific spelling requires `person` to be of
    /// that gender. Direct edges are checked before the full closure.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when the id is unregistered.
    pub fn is_related_as(
        &self,
        person: &PersonId,
        relation: RelationInput,
        level: i32,
    ) -> Result<bool, GraphError> {
        if let Some(gender) = relation.gender()
            && self.person(person)?.gender != gender
        {
            return Ok(false);
        }
        let kind = relation.kind();
        let matches_claim = |edge: &ConnectionEdge| edge.level == level && edge.kind == kind;
        if self.neighbour_connections(person)?.iter().any(matches_claim) {
            return Ok(true);
        }
        Ok(self.connections_for(person)?.iter().any(matches_claim))
    }
}
