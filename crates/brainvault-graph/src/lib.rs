//! # Relation Graph Engine
//!
//! Directed, typed graph of notes for visual exploration. Each page can be
//! linked to others through family-style relations (parent, child, friend)
//! coming from two independent sources: explicit user-authored links and
//! automatically inferred reciprocal links.
//!
//! The hard part is not storage but classification: a single pair of pages
//! can simultaneously carry a defined parent link, an inferred child link,
//! and a friend link, and the engine must decide deterministically what to
//! display between them. Authored relations always beat inferred ones;
//! mutual inference with no authored signal collapses to friendship.
//!
//! ## Quick Start
//!
//! ```
//! use brainvault_graph::prelude::*;
//!
//! let settings = GraphSettings::default();
//! let mut graph = PageGraph::new(&settings);
//!
//! graph.insert_page(Page::new("index.md", None));
//! graph.add_child(
//!     "index.md",
//!     "topics/rust.md",
//!     RelationSource::Defined,
//!     LinkDirection::From,
//!     Some("down"),
//! );
//!
//! let children = graph.children("index.md", &settings);
//! assert_eq!(children.len(), 1);
//! assert_eq!(children[0].definition, "down");
//! ```
//!
//! ## Core Concepts
//!
//! - **Page**: one node, with an adjacency map holding exactly one
//!   [`Relation`](brainvault_core::Relation) record per neighbour key
//! - **Arena**: pages reference each other by key into the [`PageGraph`]
//!   registry, never by owning pointers, so cyclic note structures need no
//!   special handling
//! - **Asymmetry**: the two sides of a pair are populated independently by
//!   the extractor; no implicit mirroring occurs
//! - **Classification**: each record resolves to a displayed role through
//!   the exhaustive decision table in [`classify`]
//!
//! All operations are synchronous; queries are read-only and return
//! neighbours sorted by display title.
//!
//! ## Modules
//!
//! - [`page`] - Page entity and per-page link insertion
//! - [`classify`] - Relation classification predicates
//! - [`graph`] - Page registry, neighbourhood queries, statistics

pub mod classify;
pub mod graph;
pub mod page;

pub use classify::{ClassifiedRelation, classify, effective_child, effective_friend, effective_parent};
pub use graph::{GraphStats, Neighbour, PageGraph};
pub use page::Page;
pub use brainvault_core::prelude::*;

pub mod prelude {
    pub use crate::classify::ClassifiedRelation;
    pub use crate::graph::{GraphStats, Neighbour, PageGraph};
    pub use crate::page::Page;
    pub use brainvault_core::prelude::*;
}
