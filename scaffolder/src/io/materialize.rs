//! Create an accepted folder tree on disk.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

use crate::tree::FolderTree;

/// Directories touched by one materialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Directories that did not exist and were created.
    pub created: Vec<PathBuf>,
    /// Directories that were already present and left untouched.
    pub existing: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.existing.len()
    }
}

/// Create one directory per folder in `tree`, rooted at `base`.
///
/// Existing directories count as success, so re-running on the same tree is
/// a no-op. The first failure aborts the traversal; directories created
/// before it stay in place.
#[instrument(skip_all, fields(base = %base.display(), folders = tree.folder_count()))]
pub fn materialize(tree: &FolderTree, base: &Path) -> Result<MaterializeReport> {
    let mut report = MaterializeReport::default();
    materialize_inner(tree, base, &mut report)?;
    info!(
        created = report.created.len(),
        existing = report.existing.len(),
        "folder tree materialized"
    );
    Ok(report)
}

fn materialize_inner(tree: &FolderTree, base: &Path, report: &mut MaterializeReport) -> Result<()> {
    for entry in tree.entries() {
        let path = folder_path(base, &entry.name)?;
        if path.is_dir() {
            debug!(path = %path.display(), "folder already exists");
            report.existing.push(path.clone());
        } else {
            fs::create_dir_all(&path)
                .with_context(|| format!("create folder {}", path.display()))?;
            debug!(path = %path.display(), "created folder");
            report.created.push(path.clone());
        }
        if !entry.is_leaf() {
            materialize_inner(&entry.children, &path, report)?;
        }
    }
    Ok(())
}

/// Join `name` onto `base`, refusing names that are not one plain path segment.
fn folder_path(base: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(base.join(name)),
        _ => Err(anyhow!(
            "create folder under {}: {name:?} is not a single folder name",
            base.display()
        )),
    }
}
