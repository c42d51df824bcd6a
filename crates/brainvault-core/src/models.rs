//! Core data models for the note-relation graph.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: Enums replace magic strings and boolean soup
//!
//! The central type is [`Relation`]: the full edge state between two pages.
//! A single pair of pages can simultaneously carry parent, child, and friend
//! links coming from different sources (an authored field plus an inferred
//! reciprocal), so each axis is tracked independently as an [`AxisState`] and
//! classification happens downstream over the axis triple.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stable path-like identity of a page, unique across the graph.
pub type PageKey = String;

/// Where a relation came from: authored by the user, or derived as the
/// reciprocal of an authored link on the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationSource {
    /// Derived automatically by reciprocation
    Inferred,
    /// Authored explicitly by the user
    Defined,
}

/// The three relation axes a pair of pages can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Parent,
    Child,
    Friend,
}

/// Direction of a relation pair, from the perspective of the page that
/// stores the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkDirection {
    From,
    To,
    Both,
}

impl LinkDirection {
    /// Combine a stored direction with a newly inserted one.
    ///
    /// Repeated insertion with the same direction is a no-op; conflicting
    /// directions escalate to `Both`.
    #[must_use]
    pub fn merge(self, incoming: LinkDirection) -> LinkDirection {
        if self == incoming {
            self
        } else {
            LinkDirection::Both
        }
    }
}

/// State of one relation axis (parent, child, or friend) on a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisState {
    #[default]
    Absent,
    Inferred,
    Defined,
}

impl AxisState {
    /// Merge an incoming source into the stored state.
    ///
    /// `Defined` always wins over `Inferred`; `Inferred` wins over `Absent`.
    /// Merging never downgrades.
    #[must_use]
    pub fn merge(self, incoming: RelationSource) -> AxisState {
        match (self, incoming) {
            (AxisState::Defined, _) | (_, RelationSource::Defined) => AxisState::Defined,
            (_, RelationSource::Inferred) => AxisState::Inferred,
        }
    }

    /// Whether the axis carries any link at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, AxisState::Absent)
    }

    /// The source of the link, if present.
    pub fn source(&self) -> Option<RelationSource> {
        match self {
            AxisState::Absent => None,
            AxisState::Inferred => Some(RelationSource::Inferred),
            AxisState::Defined => Some(RelationSource::Defined),
        }
    }
}

/// One relation axis: its state plus the accumulated vocabulary terms that
/// produced it (e.g. "up", "Parent").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub state: AxisState,
    /// Comma-separated vocabulary terms, insertion order preserved.
    pub definition: String,
}

impl Axis {
    /// Record an insertion on this axis: upgrade the state per source
    /// precedence and append the definition term.
    pub fn record(&mut self, source: RelationSource, definition: Option<&str>) {
        self.state = self.state.merge(source);
        if let Some(def) = definition {
            append_definition(&mut self.definition, def);
        }
    }
}

/// Append a definition term to a comma-separated list, dropping empty
/// operands and terms already present (repeated insertion of the same edge
/// must leave the stored record unchanged).
fn append_definition(existing: &mut String, incoming: &str) {
    let incoming = incoming.trim();
    if incoming.is_empty() {
        return;
    }
    if existing.is_empty() {
        existing.push_str(incoming);
        return;
    }
    if existing.split(", ").any(|term| term == incoming) {
        return;
    }
    existing.push_str(", ");
    existing.push_str(incoming);
}

/// The full edge state between two pages: all three axes plus the pair
/// direction. Stored once per ordered pair in the owning page's adjacency
/// map; the mirror record on the other page is populated independently and
/// need not agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Key of the neighbour page in the graph's page registry.
    pub target: PageKey,
    pub parent: Axis,
    pub child: Axis,
    pub friend: Axis,
    pub direction: LinkDirection,
}

impl Relation {
    /// Create an empty relation record toward `target`.
    pub fn new(target: impl Into<PageKey>, direction: LinkDirection) -> Self {
        Self {
            target: target.into(),
            parent: Axis::default(),
            child: Axis::default(),
            friend: Axis::default(),
            direction,
        }
    }

    /// Record a parent link on this pair.
    pub fn record_parent(
        &mut self,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        self.parent.record(source, definition);
        self.direction = self.direction.merge(direction);
    }

    /// Record a child link on this pair.
    pub fn record_child(
        &mut self,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        self.child.record(source, definition);
        self.direction = self.direction.merge(direction);
    }

    /// Record a friend link on this pair.
    pub fn record_friend(
        &mut self,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        self.friend.record(source, definition);
        self.direction = self.direction.merge(direction);
    }
}

/// Metadata of the file backing a page, supplied by the note source.
///
/// A page with no `FileRef` is virtual: referenced by a link but not yet
/// materialized on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub path: PathBuf,
    pub extension: String,
    /// Modification time in seconds since the epoch.
    pub modified_at: f64,
}

impl FileRef {
    /// Create a file reference, deriving the extension from the path.
    pub fn new(path: impl Into<PathBuf>, modified_at: f64) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        Self {
            path,
            extension,
            modified_at,
        }
    }

    /// Whether the backing file is a markdown note.
    pub fn is_markdown(&self) -> bool {
        self.extension == "md"
    }

    /// File name without the extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// Derive a display name from a path-like page key: the last path segment,
/// with a trailing `.md` dropped.
pub fn name_from_key(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    name.strip_suffix(".md").unwrap_or(name)
}

/// Ancestor directories of a path-like key, shallowest first.
///
/// `"a/b/c.md"` yields `["a", "a/b"]`.
pub fn ancestor_dirs(key: &str) -> Vec<String> {
    let path = Path::new(key);
    let mut dirs = Vec::new();
    let mut current = PathBuf::new();
    let segments: Vec<_> = path.iter().collect();
    if segments.len() < 2 {
        return dirs;
    }
    for segment in &segments[..segments.len() - 1] {
        current.push(segment);
        dirs.push(current.to_string_lossy().to_string());
    }
    dirs
}
