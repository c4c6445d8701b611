pub mod aggregator;
pub mod error;
pub mod scanner;
pub mod store;

use std::path::PathBuf;

/// A directory discovered under one of the configured root paths.
///
/// Projects are ephemeral: they are rebuilt from disk on every scan and never
/// persisted. `name` is unique across a scan result (the scanner keeps the
/// last-seen entry per name); `full_path` keys category assignment lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub full_path: PathBuf,
    pub root_path: PathBuf,
}

/// A transient grouping node: one per distinct category label observed across
/// the current projects, including the synthetic Uncategorized group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub label: String,
    pub member_count: usize,
}

pub use aggregator::{collate, ProjectAggregator};
pub use error::CoreError;
pub use scanner::ProjectScanner;
pub use store::{AssignmentBackend, CategoryStore, JsonFileBackend, MemoryBackend};
