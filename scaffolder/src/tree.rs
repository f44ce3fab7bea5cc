//! Folder tree model for generated proposals.
//!
//! A [`FolderTree`] is an ordered mapping from folder name to the folders
//! nested beneath it. Entries keep the order the backend wrote them in so the
//! proposal reads naturally when displayed; order has no effect on disk.

use anyhow::{Context, Result, bail};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// A named folder and its nested folders. Leaf folders have an empty subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub children: FolderTree,
}

impl FolderEntry {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderTree {
    entries: Vec<FolderEntry>,
}

impl FolderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON payload into a folder tree.
    ///
    /// The payload must be an object. Empty values (`null`, `{}`, `[]`, `""`,
    /// `false`, `0`) are leaf folders and objects are nested folders. Any other
    /// value is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parse proposal json")?;
        match value {
            Value::Object(map) => Self::from_map(map, &mut Vec::new()),
            other => bail!("proposal must be a JSON object, got {}", json_kind(&other)),
        }
    }

    fn from_map(map: Map<String, Value>, path: &mut Vec<String>) -> Result<Self> {
        let mut tree = Self::new();
        for (name, value) in map {
            if name.trim().is_empty() {
                bail!("empty folder name under {}", display_path(path));
            }
            path.push(name.clone());
            let children = match value {
                Value::Null => Self::new(),
                Value::Array(items) if items.is_empty() => Self::new(),
                Value::String(text) if text.is_empty() => Self::new(),
                Value::Bool(false) => Self::new(),
                Value::Number(number) if is_zero(&number) => Self::new(),
                Value::Object(nested) => Self::from_map(nested, path)?,
                other => bail!(
                    "folder {} has a {} value; expected an object or null",
                    display_path(path),
                    value_kind(&other)
                ),
            };
            path.pop();
            tree.insert(name, children);
        }
        Ok(tree)
    }

    /// Append a folder. A repeated name replaces the earlier entry in place.
    pub fn insert(&mut self, name: impl Into<String>, children: FolderTree) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => existing.children = children,
            None => self.entries.push(FolderEntry { name, children }),
        }
    }

    /// Builder form of [`FolderTree::insert`].
    pub fn with(mut self, name: impl Into<String>, children: FolderTree) -> Self {
        self.insert(name, children);
        self
    }

    pub fn entries(&self) -> &[FolderEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&FolderTree> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.children)
    }

    /// Number of top-level folders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of folders at every level, i.e. directories a full
    /// materialization touches.
    pub fn folder_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| 1 + entry.children.folder_count())
            .sum()
    }

    /// Deepest nesting level. A tree of only leaves has depth 1.
    pub fn depth(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| 1 + entry.children.depth())
            .max()
            .unwrap_or(0)
    }
}

impl Serialize for FolderTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            if entry.is_leaf() {
                map.serialize_entry(&entry.name, &Value::Null)?;
            } else {
                map.serialize_entry(&entry.name, &entry.children)?;
            }
        }
        map.end()
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        format!("'{}'", path.join("/"))
    }
}

fn is_zero(number: &serde_json::Number) -> bool {
    number.as_f64().is_some_and(|value| value == 0.0)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Describe a folder value that is neither an object nor empty.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "non-false boolean",
        Value::Number(_) => "non-zero number",
        Value::String(_) => "non-empty string",
        Value::Array(_) => "non-empty array",
        Value::Object(_) => "object",
    }
}
