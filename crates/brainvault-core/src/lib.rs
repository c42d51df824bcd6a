//! # BrainVault Core
//!
//! Core relation model, settings, and error types for the BrainVault graph
//! engine. This crate defines the canonical types all other crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Type-Driven Design**: Relation axes are tagged unions, not boolean
//!   flags, so classification downstream is an exhaustive match
//! - **Zero Panic in Libraries**: All fallible operations return `Result`
//! - **Explicit Context**: Settings are passed into calls, never read from
//!   a process-wide singleton
//!
//! ## Core Modules
//!
//! - [`models`] - Relation primitives (axes, directions, file metadata)
//! - [`config`] - Graph settings and hierarchy vocabulary
//! - [`error`] - Error types and Result alias

pub mod config;
pub mod error;
pub mod models;

pub use config::{GraphSettings, Hierarchy};
pub use error::{Error, Result};
pub use models::*;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{GraphSettings, Hierarchy};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Axis, AxisState, FileRef, LinkDirection, PageKey, Relation, RelationSource, Role,
    };
}
