//! Graph settings consumed by the engine.
//!
//! The settings are supplied by an external settings store and passed
//! explicitly into query calls, so the engine stays testable without
//! constructing the surrounding application.

use crate::error::{Error, Result};
use crate::models::Role;
use serde::{Deserialize, Serialize};

/// Vocabulary of frontmatter field names that declare family relations.
///
/// A field whose name appears in one of these lists produces an authored
/// (defined) relation on the matching axis; field names are matched
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub friends: Vec<String>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self {
            parents: ["Parent", "Parents", "up", "u"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            children: ["Children", "Child", "down", "d"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            friends: ["Friends", "Friend", "Jump", "Jumps", "j"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Hierarchy {
    /// Resolve a frontmatter field name to the relation axis it declares.
    pub fn role_of(&self, field: &str) -> Option<Role> {
        let matches = |terms: &[String]| terms.iter().any(|t| t.eq_ignore_ascii_case(field));
        if matches(&self.parents) {
            Some(Role::Parent)
        } else if matches(&self.children) {
            Some(Role::Child)
        } else if matches(&self.friends) {
            Some(Role::Friend)
        } else {
            None
        }
    }

    /// All vocabulary terms across the three lists.
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.parents
            .iter()
            .chain(self.children.iter())
            .chain(self.friends.iter())
            .map(|s| s.as_str())
    }
}

/// Display and build settings for the relation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSettings {
    /// Path of the file the graph is rendered into. Edges toward this page
    /// are silently dropped so the graph never links to its own canvas.
    pub canvas_path: String,
    pub hierarchy: Hierarchy,
    /// Render the first declared alias instead of the file name.
    pub render_alias: bool,
    /// Surface relations derived by reciprocation; authored relations are
    /// always surfaced.
    pub show_inferred_nodes: bool,
    /// Include neighbours backed by non-markdown files.
    pub show_attachments: bool,
    /// Include neighbours with no backing file.
    pub show_virtual_nodes: bool,
    pub show_folder_nodes: bool,
    pub show_tag_nodes: bool,
    /// Include ordinary markdown pages; folder and tag nodes are exempt.
    pub show_page_nodes: bool,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            canvas_path: "brainvault.md".to_string(),
            hierarchy: Hierarchy::default(),
            render_alias: true,
            show_inferred_nodes: true,
            show_attachments: true,
            show_virtual_nodes: true,
            show_folder_nodes: false,
            show_tag_nodes: false,
            show_page_nodes: true,
        }
    }
}

impl GraphSettings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_path.is_empty() {
            return Err(Error::config_error("Canvas file path cannot be empty"));
        }

        let mut seen = std::collections::HashSet::new();
        for term in self.hierarchy.all_terms() {
            if term.is_empty() {
                return Err(Error::config_error("Hierarchy term cannot be empty"));
            }
            if !seen.insert(term.to_ascii_lowercase()) {
                return Err(Error::config_error(format!(
                    "Hierarchy term appears in more than one list: {term}"
                )));
            }
        }

        Ok(())
    }
}
