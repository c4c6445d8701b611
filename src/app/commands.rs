//! Contains the command handlers exposed to the host.
//!
//! Each function here corresponds to a command the host can invoke: refresh,
//! category assignment (manual or via drag-and-drop), opening a project and
//! adding one to the workspace. Handlers mutate the `AppState`, go through
//! the `CategoryStore` for every assignment, and notify the host with
//! `UserEvent`s.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::with_state_and_notify;
use super::prompt::{CategoryChoice, CategoryPick, PromptService};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks;
use super::view_model::{generate_ui_state, parse_drop_payload};
use crate::config::settings;
use crate::core::{collate, Project};

/// Where a drag-and-drop payload landed. Only category rows accept drops;
/// everything else is inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Category(String),
    Project(PathBuf),
    Background,
}

/// Re-scans the configured roots and rebuilds the tree.
pub fn refresh<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    tasks::start_refresh(proxy, state);
}

/// Moves a project into a category.
///
/// With an explicit target (the drag-and-drop path) the assignment commits
/// directly. Otherwise the user picks from the known labels, with a
/// "create new" entry last; cancelling at any step aborts with zero
/// mutation.
pub async fn assign_category<P: EventProxy, S: PromptService + ?Sized>(
    folder_path: PathBuf,
    explicit_target: Option<String>,
    prompt: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let target = match explicit_target {
        Some(label) => label,
        None => match choose_category(&folder_path, prompt, &state) {
            Some(label) => label,
            None => {
                tracing::info!("Category assignment cancelled; no mutation.");
                return;
            }
        },
    };

    let result = {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        state_guard.store.set(&folder_path, &target)
    };

    if let Err(e) = result {
        tracing::error!("Failed to persist category assignment: {}", e);
        proxy.send_event(UserEvent::ShowError(format!(
            "Failed to save category assignment: {e}"
        )));
    }

    // Membership of up to two categories changed; the host re-renders the
    // tree top to bottom.
    notify_tree(&proxy, &state);
}

/// Runs the quick-pick flow and returns the chosen label, or `None` on
/// cancellation.
fn choose_category<S: PromptService + ?Sized>(
    folder_path: &Path,
    prompt: &S,
    state: &Arc<Mutex<AppState>>,
) -> Option<String> {
    let choices: Vec<CategoryPick> = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        let current = state_guard.store.get(folder_path).to_string();
        state_guard
            .store
            .all_labels()
            .into_iter()
            .map(|label| CategoryPick {
                is_current: label == current,
                label,
            })
            .collect()
    };

    match prompt.pick_category(&choices)? {
        CategoryChoice::Existing(label) => Some(label),
        CategoryChoice::CreateNew => loop {
            let name = prompt.input_category_name()?;
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
            // Empty after trimming: ask again rather than committing.
        },
    }
}

/// Applies a drag-and-drop payload to its target.
///
/// Drops on anything but a category row and unparseable payloads are silent
/// no-ops. Each dragged path is committed independently, in order; a failed
/// persist does not roll back earlier assignments.
pub async fn handle_drop<P: EventProxy>(
    target: &DropTarget,
    raw_payload: &str,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let DropTarget::Category(label) = target else {
        return;
    };
    let Some(paths) = parse_drop_payload(raw_payload) else {
        tracing::debug!("Ignoring malformed drop payload.");
        return;
    };
    if paths.is_empty() {
        return;
    }

    let mut failures = 0usize;
    {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        for path in &paths {
            if let Err(e) = state_guard.store.set(path, label) {
                tracing::error!("Failed to persist assignment for {:?}: {}", path, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        proxy.send_event(UserEvent::ShowError(format!(
            "Failed to save {failures} of {} category assignments",
            paths.len()
        )));
    }
    notify_tree(&proxy, &state);
}

/// Opens a project folder through the host, in the current window or a new
/// one. Without an invocation-context project (palette invocation) the user
/// first picks one from the flattened project list.
pub async fn open_project<P: EventProxy, S: PromptService + ?Sized>(
    project: Option<Project>,
    new_window: Option<bool>,
    prompt: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(project) = resolve_target_project(project, prompt, &state) else {
        return;
    };
    let new_window = new_window.unwrap_or_else(|| {
        state
            .lock()
            .expect("Mutex was poisoned. This should not happen.")
            .config
            .open_in_new_window_by_default
    });
    proxy.send_event(UserEvent::OpenFolder {
        path: project.full_path,
        new_window,
    });
}

/// Appends a project folder to the current workspace, named by its display
/// name. Duplicate folders are the host's concern.
pub async fn add_to_workspace<P: EventProxy, S: PromptService + ?Sized>(
    project: Option<Project>,
    prompt: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Some(project) = resolve_target_project(project, prompt, &state) else {
        return;
    };
    proxy.send_event(UserEvent::WorkspaceFolderAdded {
        path: project.full_path,
        name: project.name,
    });
}

/// Flips the persisted default for window-open behavior.
pub fn toggle_open_in_new_window<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.config.open_in_new_window_by_default = !s.config.open_in_new_window_by_default;
        if let Err(e) = settings::save_config(&s.config, s.config_path.as_deref()) {
            tracing::warn!("Failed to save config after toggling window behavior: {}", e);
        }
    });
}

/// Uses the invocation-context project when present, otherwise lets the
/// user pick from the flattened, name-sorted project list. Cancellation
/// yields `None` and the caller aborts without side effects.
fn resolve_target_project<S: PromptService + ?Sized>(
    explicit: Option<Project>,
    prompt: &S,
    state: &Arc<Mutex<AppState>>,
) -> Option<Project> {
    if explicit.is_some() {
        return explicit;
    }

    let mut candidates = {
        state
            .lock()
            .expect("Mutex was poisoned. This should not happen.")
            .projects
            .clone()
    };
    candidates.sort_by(|a, b| collate(&a.name, &b.name));
    prompt.pick_project(&candidates)
}

fn notify_tree<P: EventProxy>(proxy: &P, state: &Arc<Mutex<AppState>>) {
    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    let ui_state = generate_ui_state(&state_guard);
    proxy.send_event(UserEvent::TreeUpdate(Box::new(ui_state)));
}
