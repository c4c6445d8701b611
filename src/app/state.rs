//! Defines the central, mutable state of the panel.

use crate::config::BrowserConfig;
use crate::core::store::DEFAULT_UNCATEGORIZED_LABEL;
use crate::core::{CategoryStore, JsonFileBackend, MemoryBackend, Project};

/// Holds the complete, mutable state of the panel.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared
/// access from the host's command handlers and spawned scan tasks.
pub struct AppState {
    /// The configuration settings, as consumed from the host's store.
    pub config: BrowserConfig,
    /// The persisted category assignments.
    pub store: CategoryStore,
    /// The de-duplicated project list from the most recent completed scan.
    pub projects: Vec<Project>,
    /// `true` while a scan task is in flight.
    pub is_scanning: bool,
    /// Monotonic counter used to let the latest refresh supersede earlier
    /// in-flight scans; stale scans discard their results on resolution.
    pub scan_generation: u64,
    /// Override for the config file location; `None` means the platform
    /// config directory. Used by tests and embedding hosts.
    pub config_path: Option<std::path::PathBuf>,
}

impl AppState {
    pub fn new(config: BrowserConfig, store: CategoryStore) -> Self {
        Self {
            config,
            store,
            projects: Vec::new(),
            is_scanning: false,
            scan_generation: 0,
            config_path: None,
        }
    }
}

impl Default for AppState {
    /// Creates a default `AppState`, loading the configuration and the
    /// category store from their platform locations.
    fn default() -> Self {
        let config = BrowserConfig::load().unwrap_or_default();
        let store = match JsonFileBackend::at_default_location() {
            Ok(backend) => CategoryStore::open(Box::new(backend), DEFAULT_UNCATEGORIZED_LABEL),
            Err(e) => {
                tracing::warn!(
                    "No data directory for the category store ({}); assignments will not persist.",
                    e
                );
                CategoryStore::open(Box::<MemoryBackend>::default(), DEFAULT_UNCATEGORIZED_LABEL)
            }
        };
        Self::new(config, store)
    }
}
