//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! This module acts as the adapter to the host's tree-view contract: it
//! builds the serializable two-level tree from the core's values and owns
//! the drag-and-drop wire format, keeping the aggregation logic free of
//! display concerns.

use serde::Serialize;
use std::path::PathBuf;

use super::state::AppState;
use crate::core::ProjectAggregator;

/// The transfer type under which dragged project paths travel, scoped to
/// this tree.
pub const PROJECT_TRANSFER_TYPE: &str = "application/vnd.projectdock.projectpaths";

/// A serializable snapshot of the panel for the host to render.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub tree: Vec<CategoryViewNode>,
    pub project_count: usize,
    pub is_scanning: bool,
    pub open_in_new_window_by_default: bool,
}

/// A category row with its pre-sorted project children. Fixed depth: the
/// host never expands a project node further.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CategoryViewNode {
    pub label: String,
    pub member_count: usize,
    pub projects: Vec<ProjectViewNode>,
}

/// A leaf project row; `path` doubles as the disambiguating description.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ProjectViewNode {
    pub name: String,
    pub path: PathBuf,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let tree = ProjectAggregator::build_tree(&state.projects, &state.store)
        .into_iter()
        .map(|node| {
            let projects =
                ProjectAggregator::projects_in(&node.label, &state.projects, &state.store)
                    .into_iter()
                    .map(|p| ProjectViewNode {
                        name: p.name,
                        path: p.full_path,
                    })
                    .collect();
            CategoryViewNode {
                label: node.label,
                member_count: node.member_count,
                projects,
            }
        })
        .collect();

    UiState {
        tree,
        project_count: state.projects.len(),
        is_scanning: state.is_scanning,
        open_in_new_window_by_default: state.config.open_in_new_window_by_default,
    }
}

/// Serializes dragged project paths as a JSON array of strings.
pub fn serialize_drag_payload(paths: &[PathBuf]) -> String {
    let paths: Vec<String> = paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    serde_json::to_string(&paths).unwrap_or_else(|_| "[]".to_string())
}

/// Parses a drop payload back into paths. Malformed payloads yield `None`;
/// the drop is then a silent no-op.
pub fn parse_drop_payload(raw: &str) -> Option<Vec<PathBuf>> {
    serde_json::from_str::<Vec<String>>(raw)
        .ok()
        .map(|paths| paths.into_iter().map(PathBuf::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_payload_round_trips() {
        let paths = vec![PathBuf::from("/a/proj1"), PathBuf::from("/b/proj2")];
        let raw = serialize_drag_payload(&paths);
        assert_eq!(parse_drop_payload(&raw), Some(paths));
    }

    #[test]
    fn malformed_payload_parses_to_none() {
        assert_eq!(parse_drop_payload("not json"), None);
        assert_eq!(parse_drop_payload(r#"{"paths": []}"#), None);
        assert_eq!(parse_drop_payload(r#"[1, 2]"#), None);
    }
}
