//! The asynchronous refresh task: scan, then re-aggregate, then notify.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;
use crate::core::ProjectScanner;

/// Starts a fresh scan of the configured roots.
///
/// There is no cancellation of an in-flight scan: a newer refresh simply
/// bumps the generation counter and the older scan discards its result when
/// it resolves (last-resolved-wins at the UI layer).
pub fn start_refresh<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    tokio::spawn(async move {
        refresh_task(proxy, state).await;
    });
}

async fn refresh_task<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let (roots, ignore_names, require_git, generation) = {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        state_guard.scan_generation += 1;
        state_guard.is_scanning = true;
        (
            state_guard.config.effective_roots(),
            state_guard.config.ignore.clone(),
            state_guard.config.require_git,
            state_guard.scan_generation,
        )
    };

    if roots.is_empty() {
        tracing::info!("No root paths configured; asking the host to prompt for configuration.");
        let ui_state = {
            let mut state_guard = state
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            state_guard.projects.clear();
            state_guard.is_scanning = false;
            generate_ui_state(&state_guard)
        };
        proxy.send_event(UserEvent::ConfigurationRequired);
        proxy.send_event(UserEvent::TreeUpdate(Box::new(ui_state)));
        return;
    }

    let scanner = ProjectScanner::new(ignore_names, require_git);
    let projects = scanner.scan(&roots).await;

    let mut state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    if state_guard.scan_generation != generation {
        tracing::debug!("Discarding superseded scan result (generation {}).", generation);
        return;
    }
    state_guard.projects = projects;
    state_guard.is_scanning = false;
    let ui_state = generate_ui_state(&state_guard);
    proxy.send_event(UserEvent::TreeUpdate(Box::new(ui_state)));
}
