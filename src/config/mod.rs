pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// The configuration surface consumed, not owned, by the core.
///
/// Keys are camelCase on disk to match the host's configuration store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    /// Directories whose immediate subdirectories are scanned for projects.
    pub root_paths: Vec<PathBuf>,
    /// Legacy single-root setting, consulted only when `root_paths` is empty.
    pub root_path: Option<PathBuf>,
    /// Require a `.git` child to include a discovered directory.
    pub require_git: bool,
    /// Directory names to exclude, matched exactly.
    pub ignore: HashSet<String>,
    /// Default window behavior when opening a project.
    pub open_in_new_window_by_default: bool,
}

impl BrowserConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// The root list to actually scan: `root_paths` when set, otherwise the
    /// legacy `root_path` fallback. Empty means "not configured".
    pub fn effective_roots(&self) -> Vec<PathBuf> {
        if !self.root_paths.is_empty() {
            self.root_paths.clone()
        } else {
            self.root_path.clone().into_iter().collect()
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        let mut ignore = HashSet::new();
        for name in ["node_modules", ".git", ".svn", ".hg"] {
            ignore.insert(name.to_string());
        }

        Self {
            root_paths: Vec::new(),
            root_path: None,
            require_git: false,
            ignore,
            open_in_new_window_by_default: false,
        }
    }
}
