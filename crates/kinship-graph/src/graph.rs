//! The family graph itself.
//!
//! [`FamilyGraph`] stores every registered person and their direct
//! connections as a symmetric adjacency structure: inserting an edge always
//! inserts its mirror, so traversal never needs to consult reverse kinds.
//! Indirect relations are derived on demand by a breadth-first walk that
//! folds edge kinds through the composition table; callers can opt into
//! memoization, which promotes derived edges to direct ones so later
//! queries resolve in a single hop.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use kinship_types::{ConnectionEdge, Person, PersonId, RelationInput, RelationKind, SpecificRelation};

use crate::compose::compose;
use crate::error::GraphError;
use crate::validation::{ConnectionLookup, RelationClaim, ValidatorPipeline};

/// Result of a closure walk from a single start person.
struct Closure {
    /// Composed edge from the start to every reached person.
    composed: BTreeMap<PersonId, ConnectionEdge>,
}

/// An in-memory graph of family members and their relations.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    persons: BTreeMap<PersonId, Person>,
    relations: BTreeMap<PersonId, BTreeSet<ConnectionEdge>>,
    pipeline: ValidatorPipeline,
}

impl FamilyGraph {
    /// An empty graph with the standard validation pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty graph with a caller-supplied pipeline.
    #[must_use]
    pub const fn with_pipeline(pipeline: ValidatorPipeline) -> Self {
        Self {
            persons: BTreeMap::new(),
            relations: BTreeMap::new(),
            pipeline,
        }
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Register a person. A no-op when the id is already registered, so the
    /// first registration wins.
    pub fn add_person(&mut self, person: Person) {
        if self.persons.contains_key(&person.id) {
            return;
        }
        self.relations.entry(person.id.clone()).or_default();
        self.persons.insert(person.id.clone(), person);
    }

    /// The person registered under `id`.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when no such person exists.
    pub fn person(&self, id: &PersonId) -> Result<&Person, GraphError> {
        self.persons
            .get(id)
            .ok_or_else(|| GraphError::UnknownPerson(id.clone()))
    }

    /// Every registered person, in id order.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    // -----------------------------------------------------------------------
    // Connecting
    // -----------------------------------------------------------------------

    /// Connect two already-registered people by a free-text relation token,
    /// which may be a generic kind or a gender-specific spelling. The
    /// connection is validated before it is stored.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when either id is unregistered,
    /// [`GraphError::UnparseableRelation`] when the token is not a relation,
    /// and [`GraphError::InvalidRelation`] when a validation stage vetoes it.
    pub fn connect(
        &mut self,
        p1: impl Into<PersonId>,
        relation: &str,
        p2: impl Into<PersonId>,
    ) -> Result<(), GraphError> {
        let p1 = p1.into();
        let p2 = p2.into();
        // Only ids are given here, so both people must already be known.
        self.person(&p1)?;
        self.person(&p2)?;
        let input: RelationInput = relation.parse()?;
        let kind = input.kind();
        self.connect_inner(&p1, kind, input.label(), &p2, kind.generation_level(), true)
    }

    /// Connect two people by a generic kind, registering either person if
    /// new. `level` is the claimed generation distance; validation can be
    /// switched off for edges that are already proven.
    ///
    /// # Errors
    /// [`GraphError::InvalidRelation`] when validation is on and rejects the
    /// claim.
    pub fn connect_kind(
        &mut self,
        p1: Person,
        kind: RelationKind,
        p2: Person,
        level: i32,
        validate: bool,
    ) -> Result<(), GraphError> {
        let (from, to) = (p1.id.clone(), p2.id.clone());
        self.add_person(p1);
        self.add_person(p2);
        self.connect_inner(&from, kind, None, &to, level, validate)
    }

    /// Connect two people by a gender-specific label, registering either
    /// person if new.
    ///
    /// # Errors
    /// [`GraphError::InvalidRelation`] when validation is on and rejects the
    /// claim.
    pub fn connect_specific(
        &mut self,
        p1: Person,
        relation: SpecificRelation,
        p2: Person,
        level: i32,
        validate: bool,
    ) -> Result<(), GraphError> {
        let (from, to) = (p1.id.clone(), p2.id.clone());
        self.add_person(p1);
        self.add_person(p2);
        self.connect_inner(&from, relation.kind(), Some(relation), &to, level, validate)
    }

    fn connect_inner(
        &mut self,
        p1: &PersonId,
        kind: RelationKind,
        label: Option<SpecificRelation>,
        p2: &PersonId,
        level: i32,
        validate: bool,
    ) -> Result<(), GraphError> {
        let forward = ConnectionEdge::new(p1.clone(), kind, p2.clone(), level);
        if validate {
            let claimant = self.person(p1)?;
            let target = self.person(p2)?;
            let claim = RelationClaim {
                claimant,
                kind,
                label,
                target,
                level,
            };
            if let Err(rejection) = self.pipeline.validate(&claim, self) {
                return Err(GraphError::InvalidRelation {
                    claim: forward,
                    rejection,
                });
            }
        }
        tracing::debug!(from = %p1, to = %p2, %kind, level, "adding direct connection");
        let mirror = forward.mirrored();
        self.relations.entry(p1.clone()).or_default().insert(forward);
        self.relations.entry(p2.clone()).or_default().insert(mirror);
        Ok(())
    }

    /// Re-insert already-proven edges, skipping any pair that is directly
    /// connected. No validation runs; the edges were validated when their
    /// underlying connections were first made.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when an edge names an unregistered
    /// person.
    pub fn batch_connect(
        &mut self,
        edges: impl IntoIterator<Item = ConnectionEdge>,
    ) -> Result<(), GraphError> {
        for edge in edges {
            if self.are_directly_connected(&edge.from, &edge.to)? {
                continue;
            }
            self.connect_inner(&edge.from, edge.kind, None, &edge.to, edge.level, false)?;
        }
        Ok(())
    }

    /// Remove the direct connection between two people, both the forward
    /// edge and its mirror.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] for an unregistered id and
    /// [`GraphError::NotConnected`] when no direct edge exists.
    pub fn remove_direct_connection(
        &mut self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<(), GraphError> {
        if !self.are_directly_connected(p1, p2)? {
            return Err(GraphError::NotConnected {
                from: p1.clone(),
                to: p2.clone(),
            });
        }
        if let Some(edges) = self.relations.get_mut(p1) {
            edges.retain(|edge| edge.to != *p2);
        }
        if let Some(edges) = self.relations.get_mut(p2) {
            edges.retain(|edge| edge.to != *p1);
        }
        tracing::debug!(from = %p1, to = %p2, "removed direct connection");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Direct queries
    // -----------------------------------------------------------------------

    /// The direct connections of one person.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when the id is unregistered.
    pub fn neighbour_connections(
        &self,
        person: &PersonId,
    ) -> Result<&BTreeSet<ConnectionEdge>, GraphError> {
        self.relations
            .get(person)
            .ok_or_else(|| GraphError::UnknownPerson(person.clone()))
    }

    /// Whether a direct edge runs from `p1` to `p2`.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when either id is unregistered.
    pub fn are_directly_connected(
        &self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<bool, GraphError> {
        self.person(p2)?;
        Ok(self
            .neighbour_connections(p1)?
            .iter()
            .any(|edge| edge.to == *p2))
    }

    // -----------------------------------------------------------------------
    // Derived queries
    // -----------------------------------------------------------------------

    /// The direct or derived connection from `p1` to `p2`, or `None` when
    /// the two are in disjoint components.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when either id is unregistered.
    pub fn connection(
        &self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<Option<ConnectionEdge>, GraphError> {
        self.person(p2)?;
        let closure = self.walk_closure(p1, Some(p2))?;
        Ok(closure.composed.get(p2).cloned())
    }

    /// [`Self::connection`], additionally promoting every edge discovered
    /// during the walk to a direct connection.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when either id is unregistered.
    pub fn connection_memoized(
        &mut self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<Option<ConnectionEdge>, GraphError> {
        self.person(p2)?;
        let closure = self.walk_closure(p1, Some(p2))?;
        let result = closure.composed.get(p2).cloned();
        self.memoize(closure)?;
        Ok(result)
    }

    /// The composed connection from one person to every reachable person,
    /// in target-id order.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when the id is unregistered.
    pub fn connections_for(&self, person: &PersonId) -> Result<Vec<ConnectionEdge>, GraphError> {
        let closure = self.walk_closure(person, None)?;
        Ok(closure.composed.into_values().collect())
    }

    /// [`Self::connections_for`], additionally promoting every derived edge
    /// to a direct connection so later queries resolve in one hop.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when the id is unregistered.
    pub fn connections_for_memoized(
        &mut self,
        person: &PersonId,
    ) -> Result<Vec<ConnectionEdge>, GraphError> {
        let closure = self.walk_closure(person, None)?;
        let edges: Vec<ConnectionEdge> = closure.composed.values().cloned().collect();
        self.memoize(closure)?;
        Ok(edges)
    }

    fn memoize(&mut self, closure: Closure) -> Result<(), GraphError> {
        tracing::debug!(
            discovered = closure.composed.len(),
            "memoizing derived connections"
        );
        self.batch_connect(closure.composed.into_values())
    }

    /// Breadth-first walk from `start`, composing an edge from `start` to
    /// every person discovered. First discovery wins, so each composed edge
    /// follows a shortest path by hop count. Stops early once `stop_at` is
    /// reached.
    fn walk_closure(
        &self,
        start: &PersonId,
        stop_at: Option<&PersonId>,
    ) -> Result<Closure, GraphError> {
        self.person(start)?;
        let mut composed: BTreeMap<PersonId, ConnectionEdge> = BTreeMap::new();
        let mut visited: BTreeSet<PersonId> = BTreeSet::new();
        let mut queue: VecDeque<PersonId> = VecDeque::new();
        visited.insert(start.clone());
        queue.push_back(start.clone());
        'walk: while let Some(current) = queue.pop_front() {
            for edge in self.neighbour_connections(&current)? {
                if visited.contains(&edge.to) {
                    continue;
                }
                // The first hop is taken as-is; further hops fold through
                // the composition table, accumulating edge levels.
                let derived = composed.get(&current).map_or_else(
                    || edge.clone(),
                    |prior| {
                        ConnectionEdge::new(
                            start.clone(),
                            compose(edge.kind, prior.kind),
                            edge.to.clone(),
                            prior.level.saturating_add(edge.level),
                        )
                    },
                );
                visited.insert(edge.to.clone());
                queue.push_back(edge.to.clone());
                let target = edge.to.clone();
                composed.insert(target, derived);
                if stop_at == Some(&edge.to) {
                    break 'walk;
                }
            }
        }
        Ok(Closure { composed })
    }

    // -----------------------------------------------------------------------
    // Paths
    // -----------------------------------------------------------------------

    /// The direct edges along a shortest path (by hop count) from `p1` to
    /// `p2`, in path order.
    ///
    /// # Errors
    /// [`GraphError::UnknownPerson`] when either id is unregistered and
    /// [`GraphError::NotConnected`] when no path exists. Two equal ids are
    /// not connected by any edge, so they also yield `NotConnected`.
    pub fn shortest_relation_chain(
        &self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<Vec<ConnectionEdge>, GraphError> {
        let reached_by = self.walk_predecessors(p1, p2)?;
        let mut chain = Vec::new();
        let mut cursor = p2.clone();
        while cursor != *p1 {
            let Some(edge) = reached_by.get(&cursor) else {
                return Err(GraphError::NotConnected {
                    from: p1.clone(),
                    to: p2.clone(),
                });
            };
            cursor = edge.from.clone();
            chain.push(edge.clone());
        }
        chain.reverse();
        if chain.is_empty() {
            return Err(GraphError::NotConnected {
                from: p1.clone(),
                to: p2.clone(),
            });
        }
        Ok(chain)
    }

    /// The single relation obtained by folding a shortest path from `p1` to
    /// `p2` through the composition table.
    ///
    /// # Errors
    /// As for [`Self::shortest_relation_chain`].
    pub fn aggregate_connection(
        &self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<ConnectionEdge, GraphError> {
        let chain = self.shortest_relation_chain(p1, p2)?;
        let mut hops = chain.into_iter();
        let Some(first) = hops.next() else {
            return Err(GraphError::NotConnected {
                from: p1.clone(),
                to: p2.clone(),
            });
        };
        Ok(hops.fold(first, |aggregate, hop| {
            ConnectionEdge::new(
                p1.clone(),
                compose(hop.kind, aggregate.kind),
                hop.to.clone(),
                aggregate.level.saturating_add(hop.level),
            )
        }))
    }

    /// Breadth-first walk recording, for each discovered person, the direct
    /// edge that first reached them. Stops early once `p2` is discovered.
    fn walk_predecessors(
        &self,
        p1: &PersonId,
        p2: &PersonId,
    ) -> Result<BTreeMap<PersonId, ConnectionEdge>, GraphError> {
        self.person(p2)?;
        let mut reached_by: BTreeMap<PersonId, ConnectionEdge> = BTreeMap::new();
        let mut visited: BTreeSet<PersonId> = BTreeSet::new();
        let mut queue: VecDeque<PersonId> = VecDeque::new();
        visited.insert(p1.clone());
        queue.push_back(p1.clone());
        'walk: while let Some(current) = queue.pop_front() {
            for edge in self.neighbour_connections(&current)? {
                if visited.contains(&edge.to) {
                    continue;
                }
                visited.insert(edge.to.clone());
                reached_by.insert(edge.to.clone(), edge.clone());
                if edge.to == *p2 {
                    break 'walk;
                }
                queue.push_back(edge.to.clone());
            }
        }
        Ok(reached_by)
    }
}

impl ConnectionLookup for FamilyGraph {
    fn existing_connection(&self, from: &PersonId, to: &PersonId) -> Option<ConnectionEdge> {
        self.connection(from, to).ok().flatten()
    }
}
