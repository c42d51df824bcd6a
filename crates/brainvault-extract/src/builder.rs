//! Graph construction from a batch of note records.
//!
//! The builder walks each note's frontmatter and body, resolves link
//! targets against the note set, and feeds the relation graph both sides
//! of every discovered pair: the authored edge and its inferred reciprocal.
//! The graph is rebuilt wholesale on every call; there is no incremental
//! update path.

use crate::links::{parse_wikilinks, unwrap_wikilink};
use crate::note::{NoteFields, NoteRecord};
use brainvault_core::models::{ancestor_dirs, name_from_key};
use brainvault_core::prelude::*;
use brainvault_graph::{Page, PageGraph};
use std::collections::HashMap;

/// Definition term recorded on folder containment edges.
const FOLDER_DEFINITION: &str = "folder";
/// Definition term recorded on tag membership edges.
const TAG_DEFINITION: &str = "tag";

/// Builds a [`PageGraph`] from note records using the hierarchy vocabulary
/// in the supplied settings.
pub struct GraphBuilder {
    settings: GraphSettings,
}

impl GraphBuilder {
    pub fn new(settings: GraphSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Build a fresh graph from the given notes.
    ///
    /// Notes whose key equals the canvas file are skipped entirely: the
    /// canvas is the engine's own output surface, not part of the graph.
    /// Frontmatter that fails to parse is logged and treated as absent.
    pub fn build(&self, notes: &[NoteRecord]) -> Result<PageGraph> {
        self.settings.validate()?;
        log::info!("Building relation graph from {} notes", notes.len());

        let mut graph = PageGraph::new(&self.settings);
        let mut parsed: Vec<(&NoteRecord, Option<NoteFields>)> = Vec::with_capacity(notes.len());

        // First pass: register every page and collect its parsed fields.
        for note in notes {
            if note.key == self.settings.canvas_path {
                log::debug!("skipping canvas file: {}", note.key);
                continue;
            }
            let fields = match note.fields() {
                Ok(fields) => fields,
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            };

            let mut page = Page::new(note.key.clone(), note.file.clone());
            if let Some(fields) = &fields {
                if let Some(title) = fields.title() {
                    page = page.with_display_name(title);
                }
                page = page.with_aliases(fields.aliases());
            }
            graph.insert_page(page);
            parsed.push((note, fields));
        }

        let resolver = LinkResolver::from_notes(&parsed);

        // Second pass: insert edges, both sides of each pair.
        for (note, fields) in &parsed {
            if let Some(fields) = fields {
                self.insert_field_links(&mut graph, &resolver, &note.key, fields);
                self.insert_tag_links(&mut graph, &note.key, fields);
            }
            self.insert_body_links(&mut graph, &resolver, note);
            if note.file.is_some() {
                self.insert_folder_links(&mut graph, &note.key);
            }
        }

        let stats = graph.stats();
        log::info!(
            "Graph built: {} pages, {} relations",
            stats.total_pages,
            stats.total_relations
        );
        Ok(graph)
    }

    /// Hierarchy-vocabulary fields produce authored edges plus their
    /// inferred reciprocals; both sides are stored explicitly.
    fn insert_field_links(
        &self,
        graph: &mut PageGraph,
        resolver: &LinkResolver,
        key: &str,
        fields: &NoteFields,
    ) {
        for (field, values) in fields.link_fields() {
            let Some(role) = self.settings.hierarchy.role_of(field) else {
                continue;
            };
            for value in values {
                let target = resolver.resolve(unwrap_wikilink(value));
                // Dropping the pair here keeps the reciprocal from
                // resurrecting the canvas page as a virtual node.
                if target == key || target == self.settings.canvas_path {
                    continue;
                }
                match role {
                    Role::Parent => {
                        graph.add_parent(
                            key,
                            &target,
                            RelationSource::Defined,
                            LinkDirection::From,
                            Some(field),
                        );
                        graph.add_child(
                            &target,
                            key,
                            RelationSource::Inferred,
                            LinkDirection::To,
                            Some(field),
                        );
                    }
                    Role::Child => {
                        graph.add_child(
                            key,
                            &target,
                            RelationSource::Defined,
                            LinkDirection::From,
                            Some(field),
                        );
                        graph.add_parent(
                            &target,
                            key,
                            RelationSource::Inferred,
                            LinkDirection::To,
                            Some(field),
                        );
                    }
                    // Friendship is symmetric and never inferred; the
                    // reciprocal is authored too.
                    Role::Friend => {
                        graph.add_friend(
                            key,
                            &target,
                            RelationSource::Defined,
                            LinkDirection::From,
                            Some(field),
                        );
                        graph.add_friend(
                            &target,
                            key,
                            RelationSource::Defined,
                            LinkDirection::To,
                            Some(field),
                        );
                    }
                }
            }
        }
    }

    /// A plain body link makes the target an inferred child of the source
    /// and the source an inferred parent of the target. Mutual plain links
    /// therefore classify as friendship on both sides.
    fn insert_body_links(&self, graph: &mut PageGraph, resolver: &LinkResolver, note: &NoteRecord) {
        for raw in parse_wikilinks(note.body()) {
            let target = resolver.resolve(raw);
            if target == note.key || target == self.settings.canvas_path {
                continue;
            }
            graph.add_child(
                &note.key,
                &target,
                RelationSource::Inferred,
                LinkDirection::From,
                None,
            );
            graph.add_parent(
                &target,
                &note.key,
                RelationSource::Inferred,
                LinkDirection::To,
                None,
            );
        }
    }

    /// Every ancestor directory becomes a folder page; a folder is an
    /// authored parent of the notes and subfolders it contains.
    fn insert_folder_links(&self, graph: &mut PageGraph, key: &str) {
        let dirs = ancestor_dirs(key);
        if dirs.is_empty() {
            return;
        }
        for dir in &dirs {
            if !graph.contains(dir) {
                graph.insert_page(Page::folder(dir.clone()));
            }
        }
        // Chain the folders themselves, shallowest first.
        for pair in dirs.windows(2) {
            self.link_containment(graph, &pair[1], &pair[0], FOLDER_DEFINITION);
        }
        self.link_containment(graph, key, dirs.last().unwrap(), FOLDER_DEFINITION);
    }

    /// Frontmatter tags produce tag pages that parent the tagged note.
    fn insert_tag_links(&self, graph: &mut PageGraph, key: &str, fields: &NoteFields) {
        for tag in fields.tags() {
            let tag = tag.trim_start_matches('#');
            if tag.is_empty() {
                continue;
            }
            let page = Page::tag(tag);
            let tag_key = page.key.clone();
            if !graph.contains(&tag_key) {
                graph.insert_page(page);
            }
            self.link_containment(graph, key, &tag_key, TAG_DEFINITION);
        }
    }

    fn link_containment(&self, graph: &mut PageGraph, child: &str, parent: &str, term: &str) {
        graph.add_parent(
            child,
            parent,
            RelationSource::Defined,
            LinkDirection::From,
            Some(term),
        );
        graph.add_child(
            parent,
            child,
            RelationSource::Defined,
            LinkDirection::To,
            Some(term),
        );
    }
}

/// Resolves wikilink targets to page keys: exact key, file stem, declared
/// alias, then path-tail match; unresolved targets become virtual page
/// keys as written.
struct LinkResolver {
    keys: Vec<PageKey>,
    stem_index: HashMap<String, PageKey>,
    alias_index: HashMap<String, PageKey>,
}

impl LinkResolver {
    fn from_notes(parsed: &[(&NoteRecord, Option<NoteFields>)]) -> Self {
        let mut keys = Vec::with_capacity(parsed.len());
        let mut stem_index = HashMap::new();
        let mut alias_index = HashMap::new();

        for (note, fields) in parsed {
            keys.push(note.key.clone());

            let stem = match &note.file {
                Some(file) => file.stem().to_string(),
                None => name_from_key(&note.key).to_string(),
            };
            stem_index.entry(stem).or_insert_with(|| note.key.clone());

            if let Some(fields) = fields {
                for alias in fields.aliases() {
                    alias_index.entry(alias).or_insert_with(|| note.key.clone());
                }
            }
        }

        Self {
            keys,
            stem_index,
            alias_index,
        }
    }

    fn resolve(&self, target: &str) -> PageKey {
        if self.keys.iter().any(|k| k == target) {
            return target.to_string();
        }
        if let Some(key) = self.stem_index.get(target) {
            return key.clone();
        }
        if let Some(key) = self.alias_index.get(target) {
            return key.clone();
        }

        // Path-like target: match the tail of a registered key. The final
        // segment compares with or without the markdown extension.
        let target_parts: Vec<&str> = target.split('/').filter(|p| !p.is_empty()).collect();
        if target_parts.len() > 1 {
            for key in &self.keys {
                let key_parts: Vec<&str> = key.split('/').collect();
                if key_parts.len() < target_parts.len() {
                    continue;
                }
                let start = key_parts.len() - target_parts.len();
                let tail_matches =
                    key_parts[start..]
                        .iter()
                        .zip(&target_parts)
                        .enumerate()
                        .all(|(i, (kp, tp))| {
                            if i == target_parts.len() - 1 {
                                kp == tp || kp.strip_suffix(".md") == Some(*tp)
                            } else {
                                kp == tp
                            }
                        });
                if tail_matches {
                    return key.clone();
                }
            }
        }

        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn md_file(path: &str) -> Option<FileRef> {
        Some(FileRef::new(path, 1_700_000_000.0))
    }

    fn note(key: &str, content: &str) -> NoteRecord {
        NoteRecord::new(key, md_file(key), content)
    }

    fn build(notes: &[NoteRecord]) -> PageGraph {
        GraphBuilder::new(GraphSettings::default())
            .build(notes)
            .unwrap()
    }

    #[test]
    fn test_parent_field_inserts_both_sides() {
        let graph = build(&[
            note("child.md", "---\nup: \"[[parent]]\"\n---\n"),
            note("parent.md", "No links"),
        ]);

        let child_side = graph.get("child.md").unwrap().neighbour("parent.md").unwrap();
        assert_eq!(child_side.parent.state, AxisState::Defined);
        assert_eq!(child_side.parent.definition, "up");
        assert_eq!(child_side.direction, LinkDirection::From);

        let parent_side = graph.get("parent.md").unwrap().neighbour("child.md").unwrap();
        assert_eq!(parent_side.child.state, AxisState::Inferred);
        assert_eq!(parent_side.direction, LinkDirection::To);
    }

    #[test]
    fn test_friend_field_is_authored_on_both_sides() {
        let graph = build(&[
            note("a.md", "---\nJump: \"[[b]]\"\n---\n"),
            note("b.md", ""),
        ]);

        let a_side = graph.get("a.md").unwrap().neighbour("b.md").unwrap();
        assert_eq!(a_side.friend.state, AxisState::Defined);
        let b_side = graph.get("b.md").unwrap().neighbour("a.md").unwrap();
        assert_eq!(b_side.friend.state, AxisState::Defined);
    }

    #[test]
    fn test_body_links_are_inferred() {
        let graph = build(&[note("a.md", "See [[b]] for details"), note("b.md", "")]);

        let a_side = graph.get("a.md").unwrap().neighbour("b.md").unwrap();
        assert_eq!(a_side.child.state, AxisState::Inferred);
        let b_side = graph.get("b.md").unwrap().neighbour("a.md").unwrap();
        assert_eq!(b_side.parent.state, AxisState::Inferred);
    }

    #[test]
    fn test_unresolved_target_becomes_virtual_page() {
        let graph = build(&[note("a.md", "See [[Unwritten Thought]]")]);

        let target = graph.get("Unwritten Thought").unwrap();
        assert!(target.is_virtual());
        assert_eq!(target.name, "Unwritten Thought");
    }

    #[test]
    fn test_resolution_by_stem_alias_and_tail() {
        let graph = build(&[
            note("a.md", "[[idea]] and [[The Plan]] and [[archive/old]]"),
            note("notes/idea.md", ""),
            note("plan.md", "---\naliases: [The Plan]\n---\n"),
            note("deep/archive/old.md", ""),
        ]);

        let a = graph.get("a.md").unwrap();
        assert!(a.neighbour("notes/idea.md").is_some());
        assert!(a.neighbour("plan.md").is_some());
        assert!(a.neighbour("deep/archive/old.md").is_some());
    }

    #[test]
    fn test_folder_synthesis() {
        let graph = build(&[note("projects/rust/engine.md", "")]);

        let folder = graph.get("projects/rust").unwrap();
        assert!(folder.is_folder);
        assert_eq!(folder.name, "rust");

        // folder is an authored parent of the note, chained to its own parent
        let note_side = graph
            .get("projects/rust/engine.md")
            .unwrap()
            .neighbour("projects/rust")
            .unwrap();
        assert_eq!(note_side.parent.state, AxisState::Defined);
        assert_eq!(note_side.parent.definition, "folder");

        let sub = graph.get("projects/rust").unwrap().neighbour("projects");
        assert!(sub.is_some());
        assert_eq!(sub.unwrap().parent.state, AxisState::Defined);
    }

    #[test]
    fn test_tag_synthesis() {
        let graph = build(&[note("a.md", "---\ntags: [project, draft]\n---\n")]);

        let tag = graph.get("tag:project").unwrap();
        assert!(tag.is_tag);
        assert_eq!(tag.name, "#project");

        let note_side = graph.get("a.md").unwrap().neighbour("tag:project").unwrap();
        assert_eq!(note_side.parent.state, AxisState::Defined);
        assert_eq!(note_side.parent.definition, "tag");

        let tag_side = graph.get("tag:project").unwrap().neighbour("a.md").unwrap();
        assert_eq!(tag_side.child.state, AxisState::Defined);
        assert!(graph.get("tag:draft").is_some());
    }

    #[test]
    fn test_canvas_note_is_skipped() {
        let settings = GraphSettings::default();
        let graph = GraphBuilder::new(settings.clone())
            .build(&[
                note(&settings.canvas_path, "[[a]]"),
                note("a.md", &format!("[[{}]]", settings.canvas_path)),
            ])
            .unwrap();

        assert!(!graph.contains(&settings.canvas_path));
        assert!(graph.get("a.md").unwrap().neighbours.is_empty());
    }

    #[test]
    fn test_invalid_settings_fail_build() {
        let mut settings = GraphSettings::default();
        settings.hierarchy.children.push("up".to_string());
        let result = GraphBuilder::new(settings).build(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_broken_frontmatter_still_registers_page() {
        let graph = build(&[note("a.md", "---\n{ not yaml\n---\n[[b]]")]);
        assert!(graph.contains("a.md"));
        // Body links still extracted after the bad frontmatter.
        assert!(graph.get("a.md").unwrap().neighbour("b").is_some());
    }

    #[test]
    fn test_self_link_is_dropped() {
        let graph = build(&[note("a.md", "See [[a]] again")]);
        assert!(graph.get("a.md").unwrap().neighbours.is_empty());
    }
}
