//! Human-readable rendering of a folder tree.

use crate::tree::FolderTree;

const EMPTY_TREE: &str = "(no folders)";

/// Render `tree` as an indented listing, one folder per line.
///
/// ```text
/// Novel/
/// ├── drafts/
/// │   └── chapters/
/// └── research/
/// ```
pub fn render_tree(tree: &FolderTree) -> String {
    if tree.is_empty() {
        return EMPTY_TREE.to_string();
    }
    let mut lines = Vec::new();
    for entry in tree.entries() {
        lines.push(format!("{}/", entry.name));
        render_children(&entry.children, "", &mut lines);
    }
    lines.join("\n")
}

fn render_children(tree: &FolderTree, prefix: &str, lines: &mut Vec<String>) {
    let last_index = tree.len().saturating_sub(1);
    for (index, entry) in tree.entries().iter().enumerate() {
        let (branch, indent) = if index == last_index {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        lines.push(format!("{prefix}{branch}{}/", entry.name));
        render_children(&entry.children, &format!("{prefix}{indent}"), lines);
    }
}
