//! Wikilink syntax: `[[Note]]`, `[[folder/Note]]`, `[[Note#Heading]]`,
//! `[[Note|display]]`, `![[embed]]`.

use regex::Regex;
use std::sync::LazyLock;

/// Matches [[...]] pattern; embeds match too since the `!` sits outside
/// the brackets.
static WIKILINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Parse all wikilink targets out of body text, in order of appearance.
/// Display text and heading/block references are stripped; embeds count as
/// links to their attachment.
pub fn parse_wikilinks(content: &str) -> Vec<&str> {
    WIKILINK_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let raw = caps.get(1).map(|m| m.as_str())?;
            let target = clean_target(raw);
            if target.is_empty() { None } else { Some(target) }
        })
        .collect()
}

/// Unwrap wikilink syntax from a frontmatter field value: `[[Target|x]]`
/// becomes `Target`; plain values pass through trimmed.
pub fn unwrap_wikilink(value: &str) -> &str {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix("[[")
        .and_then(|v| v.strip_suffix("]]"))
        .unwrap_or(trimmed);
    clean_target(inner)
}

/// Strip display text and heading/block references from a link target.
fn clean_target(raw: &str) -> &str {
    let target = raw.split('|').next().unwrap_or(raw);
    let target = target.split('#').next().unwrap_or(target);
    target.trim()
}
