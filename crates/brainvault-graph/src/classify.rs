//! Relation classification: resolving a stored [`Relation`] record to the
//! role(s) it should display as.
//!
//! A pair of pages can carry authored and reciprocal links on several axes
//! at once. The rules below resolve each record deterministically:
//!
//! - An authored relation always outranks a reciprocal one: a defined child
//!   link beats an inferred parent link on the same pair.
//! - A pair that is both defined-parent and defined-child is an ambiguous
//!   authored claim and displays as nothing.
//! - A pair that is inferred-parent and inferred-child with no authored
//!   signal is genuinely symmetric and collapses to an inferred friend
//!   rather than arbitrarily picking a side.
//! - An explicit friend link wins over everything on the pair.
//!
//! Each predicate is an exhaustive match over the axis states, so every
//! combination is decided in one place.

use brainvault_core::prelude::*;
use serde::Serialize;

/// A relation record resolved to a single displayed role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRelation {
    pub role: Role,
    pub source: RelationSource,
    /// Concatenated vocabulary terms of the displayed axis.
    pub definition: String,
}

/// Resolve the child role of a relation, if any.
pub fn effective_child(rel: &Relation) -> Option<RelationSource> {
    use AxisState::*;
    if rel.friend.state.is_present() {
        return None;
    }
    match (rel.parent.state, rel.child.state) {
        // An authored child link survives an inferred parent link.
        (Absent, Defined) | (Inferred, Defined) => Some(RelationSource::Defined),
        (Absent, Inferred) => Some(RelationSource::Inferred),
        // Inferred both ways is symmetric, reported as friend instead.
        (Inferred, Inferred) => None,
        // Authored both ways is ambiguous and displays as nothing.
        (Defined, Defined) => None,
        (Absent, Absent) | (Inferred, Absent) | (Defined, Absent) | (Defined, Inferred) => None,
    }
}

/// Resolve the parent role of a relation, if any. Mirror image of
/// [`effective_child`].
pub fn effective_parent(rel: &Relation) -> Option<RelationSource> {
    use AxisState::*;
    if rel.friend.state.is_present() {
        return None;
    }
    match (rel.parent.state, rel.child.state) {
        (Defined, Absent) | (Defined, Inferred) => Some(RelationSource::Defined),
        (Inferred, Absent) => Some(RelationSource::Inferred),
        (Inferred, Inferred) => None,
        (Defined, Defined) => None,
        (Absent, Absent) | (Absent, Inferred) | (Absent, Defined) | (Inferred, Defined) => None,
    }
}

/// Resolve the friend role of a relation, if any.
pub fn effective_friend(rel: &Relation) -> Option<RelationSource> {
    use AxisState::*;
    if rel.friend.state.is_present() {
        return Some(RelationSource::Defined);
    }
    match (rel.parent.state, rel.child.state) {
        // Mutual reciprocal inference with no authored signal either way.
        (Inferred, Inferred) => Some(RelationSource::Inferred),
        (Absent, Absent)
        | (Absent, Inferred)
        | (Absent, Defined)
        | (Inferred, Absent)
        | (Inferred, Defined)
        | (Defined, Absent)
        | (Defined, Inferred)
        | (Defined, Defined) => None,
    }
}

/// First matching classification in the fixed priority order child, parent,
/// friend. `None` when no axis combination yields a role.
pub fn classify(rel: &Relation) -> Option<ClassifiedRelation> {
    if let Some(source) = effective_child(rel) {
        return Some(ClassifiedRelation {
            role: Role::Child,
            source,
            definition: rel.child.definition.clone(),
        });
    }
    if let Some(source) = effective_parent(rel) {
        return Some(ClassifiedRelation {
            role: Role::Parent,
            source,
            definition: rel.parent.definition.clone(),
        });
    }
    effective_friend(rel).map(|source| ClassifiedRelation {
        role: Role::Friend,
        source,
        definition: rel.friend.definition.clone(),
    })
}
