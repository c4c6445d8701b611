//! Defines the events sent from the core to the host shell.

use std::path::PathBuf;

use super::view_model::UiState;

/// Events sent to the host (fire-and-forget through an `EventProxy`).
///
/// Each variant corresponds to a capability the host owns: rendering the
/// tree, reporting errors, prompting for configuration, and window or
/// workspace management.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete tree update; the host re-renders categories top-to-bottom.
    TreeUpdate(Box<UiState>),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// No root paths are configured; the host should point the user at the
    /// settings surface.
    ConfigurationRequired,
    /// Open the folder, replacing the current window context or spawning a
    /// new one.
    OpenFolder { path: PathBuf, new_window: bool },
    /// Append the folder as a new workspace root, named by the project's
    /// display name. De-duplication against existing roots is the host's
    /// concern.
    WorkspaceFolderAdded { path: PathBuf, name: String },
}
