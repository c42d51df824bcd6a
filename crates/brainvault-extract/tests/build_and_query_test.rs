//! Full pipeline: notes in, classified neighbourhoods out.

use brainvault_extract::prelude::*;
use brainvault_extract::NoteRecord;

fn md(key: &str, content: &str) -> NoteRecord {
    NoteRecord::new(key, Some(FileRef::new(key, 1_700_000_000.0)), content)
}

#[test]
fn test_family_queries_over_built_graph() -> anyhow::Result<()> {
    let settings = GraphSettings::default();
    let notes = vec![
        md(
            "projects/engine.md",
            "---\ntitle: Engine\nup: \"[[roadmap]]\"\nJump: \"[[notes/scratch]]\"\n---\nSee [[benchmarks]].",
        ),
        md("roadmap.md", "---\ndown: \"[[projects/surface]]\"\n---\n"),
        md("projects/surface.md", ""),
        md("notes/scratch.md", ""),
        md("benchmarks.md", ""),
    ];

    let graph = GraphBuilder::new(settings.clone()).build(&notes)?;

    // Authored parent from the `up` field.
    let parents = graph.parents("projects/engine.md", &settings);
    let roadmap: Vec<_> = parents
        .iter()
        .filter(|n| n.page.key == "roadmap.md")
        .collect();
    assert_eq!(roadmap.len(), 1);
    assert_eq!(roadmap[0].source, RelationSource::Defined);
    assert_eq!(roadmap[0].definition, "up");

    // Friend from the `Jump` field, authored on both sides.
    let friends = graph.friends("projects/engine.md", &settings);
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].page.key, "notes/scratch.md");
    assert!(graph.has_friends("notes/scratch.md", &settings));

    // Plain body link shows up as an inferred child.
    let children = graph.children("projects/engine.md", &settings);
    let bench: Vec<_> = children
        .iter()
        .filter(|n| n.page.key == "benchmarks.md")
        .collect();
    assert_eq!(bench.len(), 1);
    assert_eq!(bench[0].source, RelationSource::Inferred);

    // Sibling through the shared authored parent: roadmap declared
    // surface a child, and engine declared roadmap its parent.
    let siblings = graph.siblings("projects/engine.md", &settings);
    assert!(
        siblings
            .iter()
            .any(|n| n.page.key == "projects/surface.md")
    );

    Ok(())
}

#[test]
fn test_sibling_promotion_across_two_parents() -> anyhow::Result<()> {
    let settings = GraphSettings::default();
    // a has an authored parent p1 and an inferred parent p2 (via p2's body
    // link to a); both parents reach c, one path authored, one inferred.
    let notes = vec![
        md("a.md", "---\nup: \"[[p1]]\"\n---\n"),
        md("p1.md", "---\ndown: \"[[c]]\"\n---\n"),
        md("p2.md", "[[a]] and [[c]]"),
        md("c.md", ""),
    ];

    let graph = GraphBuilder::new(settings.clone()).build(&notes)?;

    let siblings = graph.siblings("a.md", &settings);
    let c: Vec<_> = siblings.iter().filter(|n| n.page.key == "c.md").collect();
    assert_eq!(c.len(), 1);
    assert_eq!(c[0].source, RelationSource::Defined);

    // With inferred relations hidden, only the authored path survives.
    let strict = GraphSettings {
        show_inferred_nodes: false,
        ..Default::default()
    };
    let siblings = graph.siblings("a.md", &strict);
    let c: Vec<_> = siblings.iter().filter(|n| n.page.key == "c.md").collect();
    assert_eq!(c.len(), 1);
    assert_eq!(c[0].source, RelationSource::Defined);

    Ok(())
}

#[test]
fn test_alias_rendering_in_titles() -> anyhow::Result<()> {
    let settings = GraphSettings::default();
    let notes = vec![
        md("hub.md", "[[fancy]]"),
        md("fancy.md", "---\naliases: [Shiny Name]\n---\n"),
    ];

    let graph = GraphBuilder::new(settings.clone()).build(&notes)?;
    let children = graph.children("hub.md", &settings);
    assert_eq!(children[0].page.title(&settings), "Shiny Name");

    let plain = GraphSettings {
        render_alias: false,
        ..Default::default()
    };
    assert_eq!(children[0].page.title(&plain), "fancy");
    Ok(())
}

#[test]
fn test_attachment_and_virtual_visibility() -> anyhow::Result<()> {
    let settings = GraphSettings::default();
    let notes = vec![md("a.md", "![[diagram.png]] and [[ghost]]")];

    let mut graph = GraphBuilder::new(settings.clone()).build(&notes)?;
    // The note source later materializes the attachment.
    graph.insert_page(Page::new(
        "diagram.png",
        Some(FileRef::new("diagram.png", 0.0)),
    ));

    let children = graph.children("a.md", &settings);
    assert_eq!(children.len(), 2);

    let no_attachments = GraphSettings {
        show_attachments: false,
        ..Default::default()
    };
    let children = graph.children("a.md", &no_attachments);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].page.key, "ghost");

    let no_virtual = GraphSettings {
        show_virtual_nodes: false,
        ..Default::default()
    };
    let children = graph.children("a.md", &no_virtual);
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].page.key, "diagram.png");
    Ok(())
}

#[test]
fn test_folder_and_tag_nodes_hidden_by_default() -> anyhow::Result<()> {
    let settings = GraphSettings::default();
    let notes = vec![md("projects/a.md", "---\ntags: [active]\n---\n")];

    let graph = GraphBuilder::new(settings.clone()).build(&notes)?;

    // Folder and tag parents exist in the graph but stay hidden until
    // their visibility flags are switched on.
    assert!(graph.contains("projects"));
    assert!(graph.contains("tag:active"));
    assert!(graph.parents("projects/a.md", &settings).is_empty());

    let show_all = GraphSettings {
        show_folder_nodes: true,
        show_tag_nodes: true,
        ..Default::default()
    };
    let parents = graph.parents("projects/a.md", &show_all);
    let keys: Vec<_> = parents.iter().map(|n| n.page.key.as_str()).collect();
    // Sorted by display title; the tag renders as "#active".
    assert_eq!(keys, vec!["tag:active", "projects"]);
    Ok(())
}
