//! Test-only helpers: scripted collaborators and a scratch workspace.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::io::config::{AppConfig, ConfigFile};
use crate::io::console::Console;
use crate::io::requester::ProposalRequester;

/// Requester that returns one canned response and records every prompt.
pub struct ScriptedRequester {
    response: std::result::Result<String, String>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedRequester {
    /// Respond with `payload` as the raw backend text.
    pub fn ok(payload: &str) -> Self {
        Self {
            response: Ok(payload.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Fail every request with `message`.
    pub fn err(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ProposalRequester for ScriptedRequester {
    fn request(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.response.clone().map_err(|message| anyhow!(message))
    }
}

/// Console fed from a fixed list of input lines.
///
/// Returns end of input once the lines run out.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn prompts_seen(&self) -> usize {
        self.prompts.len()
    }

    /// Lines printed so far, in order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn printed(&self, message: &str) -> bool {
        self.output.iter().any(|line| line == message)
    }

    pub fn count(&self, message: &str) -> usize {
        self.output.iter().filter(|line| *line == message).count()
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }
}

/// Temporary directory with a config whose base path lives inside it.
pub struct TestWorkspace {
    temp: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Where sessions in this workspace create folders. Not created up front.
    pub fn base_path(&self) -> PathBuf {
        self.temp.path().join("out")
    }

    pub fn config(&self) -> AppConfig {
        let mut file = ConfigFile::default();
        file.generation.base_path = self.base_path();
        file.backend.api_base = "http://127.0.0.1:9/v1".to_string();
        AppConfig::new(file, None)
    }

    /// Directories under the base path, relative and sorted.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        list_dirs(&self.base_path())
    }
}

/// All directories below `root` as sorted paths relative to `root`.
///
/// Returns an empty list when `root` does not exist.
pub fn list_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    collect_dirs(root, root, &mut dirs);
    dirs.sort();
    dirs
}

fn collect_dirs(root: &Path, dir: &Path, dirs: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Ok(relative) = path.strip_prefix(root) {
                dirs.push(relative.to_path_buf());
            }
            collect_dirs(root, &path, dirs);
        }
    }
}
