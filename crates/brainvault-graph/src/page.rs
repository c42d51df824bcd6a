//! The page entity: one node in the note graph with its adjacency map.
//!
//! A page stores at most one [`Relation`] record per neighbour key. The
//! record is created on the first link insertion for that pair and merged in
//! place on every subsequent insertion; the mirror record on the neighbour
//! is populated independently by the extractor, so the two sides of a pair
//! can legitimately disagree.

use crate::classify::{self, ClassifiedRelation};
use brainvault_core::models::name_from_key;
use brainvault_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in the note graph; may or may not correspond to a materialized
/// file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub key: PageKey,
    pub file: Option<FileRef>,
    pub is_folder: bool,
    pub is_tag: bool,
    /// Display name: explicit override, else file stem, else derived from
    /// the key.
    pub name: String,
    /// Aliases declared in the note's frontmatter, declaration order.
    pub aliases: Vec<String>,
    /// One relation record per neighbour key.
    pub neighbours: HashMap<PageKey, Relation>,
}

impl Page {
    /// Create a page for a note, virtual when `file` is `None`.
    pub fn new(key: impl Into<PageKey>, file: Option<FileRef>) -> Self {
        let key = key.into();
        let name = file
            .as_ref()
            .map(|f| f.stem().to_string())
            .unwrap_or_else(|| name_from_key(&key).to_string());
        Self {
            key,
            file,
            is_folder: false,
            is_tag: false,
            name,
            aliases: Vec::new(),
            neighbours: HashMap::new(),
        }
    }

    /// Create a folder page for a directory path.
    pub fn folder(key: impl Into<PageKey>) -> Self {
        let mut page = Page::new(key, None);
        page.is_folder = true;
        page
    }

    /// Create a tag page for a bare tag name; keyed `tag:<name>` and
    /// displayed as `#<name>`.
    pub fn tag(name: &str) -> Self {
        let mut page = Page::new(format!("tag:{name}"), None);
        page.is_tag = true;
        page.name = format!("#{name}");
        page
    }

    /// Override the computed display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach declared aliases.
    #[must_use]
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Referenced by a link but not materialized as a file.
    pub fn is_virtual(&self) -> bool {
        self.file.is_none() && !self.is_folder && !self.is_tag
    }

    /// Backed by a non-markdown file.
    pub fn is_attachment(&self) -> bool {
        self.file.as_ref().is_some_and(|f| !f.is_markdown())
    }

    /// Markdown note; files that have not been created yet are assumed to
    /// be markdown.
    pub fn is_markdown(&self) -> bool {
        self.file.as_ref().map(|f| f.is_markdown()).unwrap_or(true)
    }

    /// Display title: the first declared alias when alias rendering is on,
    /// else the computed name.
    pub fn title<'a>(&'a self, settings: &GraphSettings) -> &'a str {
        if settings.render_alias
            && let Some(alias) = self.aliases.first()
        {
            return alias;
        }
        &self.name
    }

    fn relation_mut(&mut self, target: &str, direction: LinkDirection) -> &mut Relation {
        self.neighbours
            .entry(target.to_string())
            .or_insert_with(|| Relation::new(target, direction))
    }

    /// Record a parent link toward `target`, creating or merging the
    /// relation record for that pair.
    pub fn add_parent(
        &mut self,
        target: &str,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        self.relation_mut(target, direction)
            .record_parent(source, direction, definition);
    }

    /// Record a child link toward `target`.
    pub fn add_child(
        &mut self,
        target: &str,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        self.relation_mut(target, direction)
            .record_child(source, direction, definition);
    }

    /// Record a friend link toward `target`.
    pub fn add_friend(
        &mut self,
        target: &str,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        self.relation_mut(target, direction)
            .record_friend(source, direction, definition);
    }

    /// Remove the relation record for a neighbour outright, regardless of
    /// how many axes it carried. There is no single-axis removal.
    pub fn unlink_neighbour(&mut self, key: &str) {
        self.neighbours.remove(key);
    }

    /// The stored relation record toward a neighbour, if any.
    pub fn neighbour(&self, key: &str) -> Option<&Relation> {
        self.neighbours.get(key)
    }

    /// Classify the relation toward another page, first match wins in the
    /// order child, parent, friend. Ignores display settings entirely;
    /// `None` when no record exists or no axis combination yields a role.
    pub fn relation_to_page(&self, other_key: &str) -> Option<ClassifiedRelation> {
        self.neighbours.get(other_key).and_then(classify::classify)
    }
}
