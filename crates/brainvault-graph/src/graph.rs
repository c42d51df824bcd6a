//! Page registry and neighbourhood queries.
//!
//! Pages reference each other by key into a single arena rather than by
//! owning pointers, which sidesteps ownership cycles in a graph that is
//! cyclic by nature (mutual links, sibling loops through shared parents).
//!
//! Insertion operations mutate one side's adjacency map only; queries are
//! read-only and return results sorted by display title so the renderer
//! gets a deterministic order.

use crate::classify::{self, ClassifiedRelation};
use crate::page::Page;
use brainvault_core::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A classified, filtered neighbour as handed to the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Neighbour<'a> {
    pub page: &'a Page,
    pub source: RelationSource,
    /// Concatenated vocabulary terms of the displayed axis.
    pub definition: String,
    pub direction: LinkDirection,
}

/// Aggregate counts over the whole graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_pages: usize,
    pub total_relations: usize,
    pub virtual_pages: usize,
    pub attachment_pages: usize,
    /// Pages with no stored relations and no incoming references.
    pub orphaned_pages: usize,
}

/// Arena of pages keyed by their stable path-like identity.
#[derive(Debug, Clone, Serialize)]
pub struct PageGraph {
    pages: HashMap<PageKey, Page>,
    /// Edges toward this key are dropped so the graph never links to its
    /// own rendering canvas.
    canvas_path: PageKey,
}

impl PageGraph {
    /// Create an empty graph for the given settings.
    pub fn new(settings: &GraphSettings) -> Self {
        Self {
            pages: HashMap::new(),
            canvas_path: settings.canvas_path.clone(),
        }
    }

    /// Register a page. If the key is already present (for example as a
    /// virtual page auto-created by an earlier edge insertion), the
    /// existing adjacency map is kept and only the page's identity fields
    /// are adopted.
    pub fn insert_page(&mut self, page: Page) {
        match self.pages.entry(page.key.clone()) {
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                existing.file = page.file;
                existing.is_folder = page.is_folder;
                existing.is_tag = page.is_tag;
                existing.name = page.name;
                existing.aliases = page.aliases;
            }
            Entry::Vacant(slot) => {
                slot.insert(page);
            }
        }
    }

    /// Get or create the page for a key; unseen keys become virtual pages.
    pub fn ensure_page(&mut self, key: &str) -> &mut Page {
        self.pages
            .entry(key.to_string())
            .or_insert_with(|| Page::new(key, None))
    }

    pub fn get(&self, key: &str) -> Option<&Page> {
        self.pages.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Page> {
        self.pages.get_mut(key)
    }

    /// Look up a page, erroring when the key is unknown.
    pub fn page(&self, key: &str) -> Result<&Page> {
        self.pages.get(key).ok_or_else(|| Error::not_found(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether an edge toward `target` must be suppressed.
    fn suppressed(&self, target: &str) -> bool {
        if target == self.canvas_path {
            log::debug!("dropping edge toward canvas file: {target}");
            true
        } else {
            false
        }
    }

    /// Record a parent link `from -> to`. Unseen keys are created as
    /// virtual pages; edges toward the canvas file are silently dropped.
    pub fn add_parent(
        &mut self,
        from: &str,
        to: &str,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        if self.suppressed(to) {
            return;
        }
        self.ensure_page(to);
        self.ensure_page(from)
            .add_parent(to, source, direction, definition);
    }

    /// Record a child link `from -> to`.
    pub fn add_child(
        &mut self,
        from: &str,
        to: &str,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        if self.suppressed(to) {
            return;
        }
        self.ensure_page(to);
        self.ensure_page(from)
            .add_child(to, source, direction, definition);
    }

    /// Record a friend link `from -> to`.
    pub fn add_friend(
        &mut self,
        from: &str,
        to: &str,
        source: RelationSource,
        direction: LinkDirection,
        definition: Option<&str>,
    ) {
        if self.suppressed(to) {
            return;
        }
        self.ensure_page(to);
        self.ensure_page(from)
            .add_friend(to, source, direction, definition);
    }

    /// Remove `from`'s relation record toward `to`. The mirror record on
    /// `to`, if any, is left untouched.
    pub fn unlink(&mut self, from: &str, to: &str) {
        if let Some(page) = self.pages.get_mut(from) {
            page.unlink_neighbour(to);
        }
    }

    /// Raw classification of the relation `from -> to`, independent of
    /// display settings.
    pub fn relation_to(&self, from: &str, to: &str) -> Option<ClassifiedRelation> {
        self.pages.get(from)?.relation_to_page(to)
    }

    pub fn has_children(&self, key: &str, settings: &GraphSettings) -> bool {
        self.has_role(key, settings, classify::effective_child)
    }

    pub fn children<'a>(&'a self, key: &str, settings: &GraphSettings) -> Vec<Neighbour<'a>> {
        self.role_neighbours(key, settings, classify::effective_child, |rel| &rel.child)
    }

    pub fn has_parents(&self, key: &str, settings: &GraphSettings) -> bool {
        self.has_role(key, settings, classify::effective_parent)
    }

    pub fn parents<'a>(&'a self, key: &str, settings: &GraphSettings) -> Vec<Neighbour<'a>> {
        self.role_neighbours(key, settings, classify::effective_parent, |rel| &rel.parent)
    }

    pub fn has_friends(&self, key: &str, settings: &GraphSettings) -> bool {
        self.has_role(key, settings, classify::effective_friend)
    }

    pub fn friends<'a>(&'a self, key: &str, settings: &GraphSettings) -> Vec<Neighbour<'a>> {
        self.role_neighbours(key, settings, classify::effective_friend, |rel| &rel.friend)
    }

    /// Pages sharing a parent with this page: the union of every filtered
    /// parent's filtered children, deduplicated by key. When a sibling is
    /// reachable through more than one parent, the first-seen entry wins
    /// and its source is promoted to `Defined` if any path is defined.
    ///
    /// A page recorded as its own parent's child appears in its own
    /// sibling set; callers that want it excluded must filter it.
    pub fn siblings<'a>(&'a self, key: &str, settings: &GraphSettings) -> Vec<Neighbour<'a>> {
        let mut merged: HashMap<&'a str, Neighbour<'a>> = HashMap::new();
        for parent in self.parents(key, settings) {
            for child in self.children(&parent.page.key, settings) {
                let child_key: &'a str = child.page.key.as_str();
                match merged.entry(child_key) {
                    Entry::Occupied(mut slot) => {
                        if child.source == RelationSource::Defined {
                            slot.get_mut().source = RelationSource::Defined;
                        }
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(child);
                    }
                }
            }
        }
        let mut out: Vec<Neighbour<'a>> = merged.into_values().collect();
        self.sort_neighbours(&mut out, settings);
        out
    }

    /// Aggregate counts for diagnostics.
    pub fn stats(&self) -> GraphStats {
        let total_pages = self.pages.len();
        let total_relations = self.pages.values().map(|p| p.neighbours.len()).sum();
        let virtual_pages = self.pages.values().filter(|p| p.is_virtual()).count();
        let attachment_pages = self.pages.values().filter(|p| p.is_attachment()).count();

        let mut referenced: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for page in self.pages.values() {
            for target in page.neighbours.keys() {
                referenced.insert(target.as_str());
            }
        }
        let orphaned_pages = self
            .pages
            .values()
            .filter(|p| p.neighbours.is_empty() && !referenced.contains(p.key.as_str()))
            .count();

        GraphStats {
            total_pages,
            total_relations,
            virtual_pages,
            attachment_pages,
            orphaned_pages,
        }
    }

    /// Whether a neighbour page survives the visibility settings. The
    /// flags are properties of the neighbour itself, not of the edge.
    fn passes_filter(page: &Page, settings: &GraphSettings) -> bool {
        let is_plain_page = page.is_markdown() && !page.is_folder && !page.is_tag;
        (settings.show_virtual_nodes || !page.is_virtual())
            && (settings.show_attachments || !page.is_attachment())
            && (settings.show_folder_nodes || !page.is_folder)
            && (settings.show_tag_nodes || !page.is_tag)
            && (settings.show_page_nodes || !is_plain_page)
    }

    fn has_role(
        &self,
        key: &str,
        settings: &GraphSettings,
        predicate: fn(&Relation) -> Option<RelationSource>,
    ) -> bool {
        let Some(page) = self.pages.get(key) else {
            return false;
        };
        page.neighbours
            .values()
            .any(|rel| self.surviving_source(rel, settings, predicate).is_some())
    }

    fn role_neighbours<'a>(
        &'a self,
        key: &str,
        settings: &GraphSettings,
        predicate: fn(&Relation) -> Option<RelationSource>,
        axis: fn(&Relation) -> &Axis,
    ) -> Vec<Neighbour<'a>> {
        let Some(page) = self.pages.get(key) else {
            return Vec::new();
        };
        let mut out: Vec<Neighbour<'a>> = page
            .neighbours
            .values()
            .filter_map(|rel| {
                let target = self.pages.get(&rel.target)?;
                let source = self.surviving_source(rel, settings, predicate)?;
                Some(Neighbour {
                    page: target,
                    source,
                    definition: axis(rel).definition.clone(),
                    direction: rel.direction,
                })
            })
            .collect();
        self.sort_neighbours(&mut out, settings);
        out
    }

    /// Apply the visibility filter and inferred gating to one relation,
    /// returning the source of the displayed role when it survives.
    fn surviving_source(
        &self,
        rel: &Relation,
        settings: &GraphSettings,
        predicate: fn(&Relation) -> Option<RelationSource>,
    ) -> Option<RelationSource> {
        let target = self.pages.get(&rel.target)?;
        if !Self::passes_filter(target, settings) {
            return None;
        }
        let source = predicate(rel)?;
        if source == RelationSource::Inferred && !settings.show_inferred_nodes {
            return None;
        }
        Some(source)
    }

    fn sort_neighbours(&self, list: &mut [Neighbour<'_>], settings: &GraphSettings) {
        list.sort_by(|a, b| {
            a.page
                .title(settings)
                .cmp(b.page.title(settings))
                .then_with(|| a.page.key.cmp(&b.page.key))
        });
    }
}
