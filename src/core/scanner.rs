use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::Project;

/// Enumerates the immediate subdirectories of the configured root paths.
///
/// The scanner is intentionally shallow: it never recurses, never reads file
/// contents and never watches for changes. Filtering is an exact match against
/// the configured ignore names plus an optional `.git` marker requirement.
pub struct ProjectScanner {
    ignore_names: HashSet<String>,
    require_vcs_marker: bool,
}

impl ProjectScanner {
    pub fn new(ignore_names: HashSet<String>, require_vcs_marker: bool) -> Self {
        Self {
            ignore_names,
            require_vcs_marker,
        }
    }

    /// Scans all roots sequentially, in the given order, and returns the
    /// de-duplicated flat project list.
    ///
    /// A root that does not exist or cannot be read is skipped; partial
    /// results are expected. When two roots yield the same project name the
    /// later-seen entry wins, replacing the earlier one in place so its
    /// position in the result is kept (deterministic by root iteration
    /// order).
    pub async fn scan(&self, roots: &[PathBuf]) -> Vec<Project> {
        let mut projects: Vec<Project> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for root in roots {
            let entries = match self.list_root(root).await {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::debug!("Skipping unreadable root {:?}: {}", root, e);
                    continue;
                }
            };

            for project in entries {
                match seen.get(&project.name) {
                    Some(&idx) => projects[idx] = project,
                    None => {
                        seen.insert(project.name.clone(), projects.len());
                        projects.push(project);
                    }
                }
            }
        }

        tracing::info!(
            "Scan complete: {} projects across {} roots",
            projects.len(),
            roots.len()
        );
        projects
    }

    /// Lists the directory entries of a single root that pass the filters,
    /// in name order so repeated scans of an unchanged tree are idempotent.
    async fn list_root(&self, root: &Path) -> std::io::Result<Vec<Project>> {
        let mut dir = tokio::fs::read_dir(root).await?;
        let mut found = Vec::new();

        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("Stopping traversal of {:?}: {}", root, e);
                    break;
                }
            };

            let file_type = match entry.file_type().await {
                Ok(ft) => ft,
                Err(_) => continue,
            };
            if !file_type.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if self.ignore_names.contains(&name) {
                continue;
            }

            let full_path = entry.path();
            if self.require_vcs_marker && !has_vcs_marker(&full_path).await {
                continue;
            }

            found.push(Project {
                name,
                full_path,
                root_path: root.to_path_buf(),
            });
        }

        // read_dir order is platform dependent; normalize per root.
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}

/// Existence check only; the state of the repository is irrelevant.
async fn has_vcs_marker(path: &Path) -> bool {
    tokio::fs::metadata(path.join(".git")).await.is_ok()
}
