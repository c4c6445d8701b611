//! The persisted mapping from project folder path to category label.
//!
//! Absence of an entry IS the "Uncategorized" state. The rendered label for
//! that state comes from the host's localization and is injected at
//! construction time; it is never written to the backing store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;

use super::aggregator::collate;
use super::error::CoreError;

const STORE_FILE: &str = "categories.json";

/// Fallback rendering of the implicit default group, used when the host does
/// not supply a localized label.
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Abstraction over the persistence of category assignments.
///
/// The production backend writes a JSON file; hosts that own persistence
/// themselves (and tests) use [`MemoryBackend`].
pub trait AssignmentBackend: Send + Sync {
    fn load(&self) -> Result<HashMap<PathBuf, String>, CoreError>;
    fn persist(&self, assignments: &HashMap<PathBuf, String>) -> Result<(), CoreError>;
}

/// Stores assignments as a single pretty-printed JSON object,
/// `{ "/abs/folder/path": "label" }`.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Places the store file in the platform data directory.
    pub fn at_default_location() -> Result<Self, CoreError> {
        let dirs = ProjectDirs::from("com", "projectdock", "ProjectDock")
            .ok_or(CoreError::NoStorageDir)?;
        Ok(Self::new(dirs.data_dir().join(STORE_FILE)))
    }
}

impl AssignmentBackend for JsonFileBackend {
    fn load(&self) -> Result<HashMap<PathBuf, String>, CoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HashMap::new());
            }
            Err(e) => return Err(CoreError::Io(e, self.path.clone())),
        };

        // A corrupt store file should not take the whole panel down; fall
        // back to an empty map and let the user re-assign.
        match serde_json::from_str(&content) {
            Ok(assignments) => Ok(assignments),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse category store at {:?}: {}. Starting empty.",
                    self.path,
                    e
                );
                Ok(HashMap::new())
            }
        }
    }

    fn persist(&self, assignments: &HashMap<PathBuf, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Io(e, parent.to_path_buf()))?;
        }
        let json = serde_json::to_string_pretty(assignments)?;
        std::fs::write(&self.path, json).map_err(|e| CoreError::Io(e, self.path.clone()))?;
        tracing::info!("Saved {} category assignments to {:?}", assignments.len(), self.path);
        Ok(())
    }
}

/// In-memory backend for tests and for hosts that manage persistence
/// through their own keyed storage.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryBackend {
    pub fn with_entries(entries: HashMap<PathBuf, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    pub fn snapshot(&self) -> HashMap<PathBuf, String> {
        self.entries
            .lock()
            .expect("Mutex was poisoned. This should not happen.")
            .clone()
    }
}

impl AssignmentBackend for MemoryBackend {
    fn load(&self) -> Result<HashMap<PathBuf, String>, CoreError> {
        Ok(self.snapshot())
    }

    fn persist(&self, assignments: &HashMap<PathBuf, String>) -> Result<(), CoreError> {
        *self
            .entries
            .lock()
            .expect("Mutex was poisoned. This should not happen.") = assignments.clone();
        Ok(())
    }
}

/// The category assignment store: an in-memory map mirrored to a backend on
/// every mutation.
pub struct CategoryStore {
    assignments: HashMap<PathBuf, String>,
    uncategorized: String,
    backend: Box<dyn AssignmentBackend>,
}

impl CategoryStore {
    /// Loads the store through the given backend.
    ///
    /// A backend that fails to load is logged and treated as empty, matching
    /// the resilience of the config layer. Entries whose value equals the
    /// current Uncategorized rendering or is empty are scrubbed: absence of
    /// the key is the canonical representation of the default state, and a
    /// stored label is always a non-empty string.
    pub fn open(backend: Box<dyn AssignmentBackend>, uncategorized_label: impl Into<String>) -> Self {
        let uncategorized = uncategorized_label.into();
        let mut assignments = match backend.load() {
            Ok(assignments) => assignments,
            Err(e) => {
                tracing::warn!("Failed to load category store: {}. Starting empty.", e);
                HashMap::new()
            }
        };

        let before = assignments.len();
        assignments.retain(|_, label| !label.trim().is_empty() && label != &uncategorized);
        if assignments.len() != before {
            tracing::warn!(
                "Scrubbed {} stored assignments that were empty or equal to the Uncategorized label",
                before - assignments.len()
            );
        }

        Self {
            assignments,
            uncategorized,
            backend,
        }
    }

    pub fn uncategorized_label(&self) -> &str {
        &self.uncategorized
    }

    /// Explicit optional lookup of the raw stored entry.
    pub fn assignment(&self, folder_path: &Path) -> Option<&str> {
        self.assignments.get(folder_path).map(String::as_str)
    }

    /// Resolved label for a folder: the assigned one, or the Uncategorized
    /// rendering when no entry exists.
    pub fn get(&self, folder_path: &Path) -> &str {
        self.assignment(folder_path).unwrap_or(&self.uncategorized)
    }

    /// Upserts the trimmed label for a folder, or deletes the entry when the
    /// label is empty after trimming or equals the Uncategorized rendering.
    /// A stored value is always a non-empty string.
    ///
    /// Persistence failures propagate to the caller; the in-memory change
    /// stands so a later successful write picks it up.
    pub fn set(&mut self, folder_path: &Path, label: &str) -> Result<(), CoreError> {
        let label = label.trim();
        if label.is_empty() || label == self.uncategorized {
            self.assignments.remove(folder_path);
        } else {
            self.assignments
                .insert(folder_path.to_path_buf(), label.to_string());
        }
        self.backend.persist(&self.assignments)
    }

    /// Distinct stored labels plus the Uncategorized rendering, in collation
    /// order.
    pub fn all_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.assignments.values().cloned().collect();
        labels.push(self.uncategorized.clone());
        labels.sort_by(|a, b| collate(a, b));
        labels.dedup();
        labels
    }
}
