//! # Link Extraction
//!
//! Turns raw note records into a populated relation graph.
//!
//! The extractor reads two kinds of links out of each note:
//!
//! - **Authored links**: frontmatter fields whose names appear in the
//!   hierarchy vocabulary (`up`, `down`, `Jump`, ...). These produce a
//!   defined relation on the declaring side and an inferred reciprocal on
//!   the target side.
//! - **Plain links**: wikilinks in the note body. These produce inferred
//!   child/parent pairs; two notes that link to each other end up as
//!   inferred friends once classified.
//!
//! It also synthesizes folder pages from note paths and tag pages from
//! frontmatter tags, so the structural hierarchy of the vault shows up in
//! the graph alongside the authored one.
//!
//! ## Quick Start
//!
//! ```
//! use brainvault_extract::{GraphBuilder, NoteRecord};
//! use brainvault_core::prelude::*;
//!
//! let notes = vec![
//!     NoteRecord::new("index.md", None, "---\ndown: \"[[rust]]\"\n---\n"),
//!     NoteRecord::new("rust.md", None, "Back to [[index]]"),
//! ];
//!
//! let graph = GraphBuilder::new(GraphSettings::default())
//!     .build(&notes)
//!     .unwrap();
//! assert!(graph.contains("rust.md"));
//! ```
//!
//! ## Modules
//!
//! - [`note`] - Note records and frontmatter fields
//! - [`links`] - Wikilink syntax parsing
//! - [`builder`] - Graph construction and link resolution

pub mod builder;
pub mod links;
pub mod note;

pub use builder::GraphBuilder;
pub use links::{parse_wikilinks, unwrap_wikilink};
pub use note::{NoteFields, NoteRecord};

pub mod prelude {
    pub use crate::builder::GraphBuilder;
    pub use crate::note::{NoteFields, NoteRecord};
    pub use brainvault_graph::prelude::*;
}
