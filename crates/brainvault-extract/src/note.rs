//! Note records: the raw input the note source hands to the extractor.

use brainvault_core::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Matches YAML frontmatter: --- ... ---
static FRONTMATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^---\s*\n([\s\S]*?)\n---\s*\n").unwrap());

/// One note as supplied by the note source: its graph key, optional backing
/// file, and raw content. Frontmatter is carved out of the content on
/// demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub key: PageKey,
    pub file: Option<FileRef>,
    pub content: String,
}

impl NoteRecord {
    pub fn new(key: impl Into<PageKey>, file: Option<FileRef>, content: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            file,
            content: content.into(),
        }
    }

    /// Parse the frontmatter block, if present.
    pub fn fields(&self) -> Result<Option<NoteFields>> {
        let Some(caps) = FRONTMATTER_PATTERN.captures(&self.content) else {
            return Ok(None);
        };
        let yaml = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let value: serde_json::Value = serde_yaml::from_str(yaml)
            .map_err(|e| Error::parse_error(format!("invalid frontmatter in {}: {e}", self.key)))?;
        match value {
            serde_json::Value::Object(data) => Ok(Some(NoteFields { data })),
            serde_json::Value::Null => Ok(None),
            _ => Err(Error::parse_error(format!(
                "frontmatter in {} is not a mapping",
                self.key
            ))),
        }
    }

    /// Content with the frontmatter block stripped.
    pub fn body(&self) -> &str {
        match FRONTMATTER_PATTERN.find(&self.content) {
            Some(m) => &self.content[m.end()..],
            None => &self.content,
        }
    }
}

/// Parsed frontmatter fields of a note, field order preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteFields {
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl NoteFields {
    /// Extract aliases; accepts a single string or an array of strings.
    pub fn aliases(&self) -> Vec<String> {
        self.string_list("aliases")
    }

    /// Extract tags; accepts a single string or an array of strings.
    pub fn tags(&self) -> Vec<String> {
        self.string_list("tags")
    }

    /// Explicit display name override.
    pub fn title(&self) -> Option<String> {
        match self.data.get("title") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// Iterate fields as (name, values) pairs, keeping only string and
    /// string-array values; everything else cannot name link targets.
    pub fn link_fields(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.data.iter().filter_map(|(name, value)| {
            let values = match value {
                serde_json::Value::String(s) => vec![s.as_str()],
                serde_json::Value::Array(arr) => {
                    arr.iter().filter_map(|v| v.as_str()).collect::<Vec<_>>()
                }
                _ => return None,
            };
            if values.is_empty() {
                None
            } else {
                Some((name.as_str(), values))
            }
        })
    }

    fn string_list(&self, field: &str) -> Vec<String> {
        match self.data.get(field) {
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect(),
            _ => vec![],
        }
    }
}
