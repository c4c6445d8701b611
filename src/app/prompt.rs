//! An abstraction layer over the host's quick-pick and input widgets.

use crate::core::Project;

/// One selectable entry in the category quick-pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPick {
    pub label: String,
    /// Marks the project's current category in the pick list.
    pub is_current: bool,
}

/// The outcome of the category quick-pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    Existing(String),
    /// The synthetic "create new category" entry, shown last and always
    /// visible regardless of filtering.
    CreateNew,
}

/// Defines a common interface for the host's selection prompts.
/// This allows for a scripted implementation during tests, avoiding the need
/// to interact with actual editor widgets.
///
/// The embedding host backs this with its quick-pick and input-box widgets;
/// returning `None` from any method means the user dismissed the prompt.
pub trait PromptService: Send + Sync {
    /// Presents the category choices plus the "create new" entry.
    fn pick_category(&self, choices: &[CategoryPick]) -> Option<CategoryChoice>;

    /// Prompts for a free-text category name.
    fn input_category_name(&self) -> Option<String>;

    /// Lets the user pick one project by name, with its path shown for
    /// disambiguation.
    fn pick_project(&self, projects: &[Project]) -> Option<Project>;
}
