//! Joins scanner output with the category store to build the two-level tree.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::store::CategoryStore;
use super::{CategoryNode, Project};

/// Locale-aware lexical comparison: Unicode lowercase mapping as the primary
/// key, so "banana" sorts between "Apple" and "Cherry", with a plain
/// comparison as the tiebreak so case variants order deterministically
/// rather than by scan order.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(|c| c.to_lowercase())
        .cmp(b.chars().flat_map(|c| c.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Stateless aggregation over the current project list.
///
/// The tree is fixed at two levels: categories at the root, projects below.
/// A project node is never itself collapsible.
pub struct ProjectAggregator;

impl ProjectAggregator {
    /// Groups the projects by their resolved category label and returns one
    /// node per distinct label, sorted by label.
    ///
    /// The synthetic Uncategorized group appears whenever any project lacks a
    /// stored assignment; it is not special-cased here because the store
    /// already resolves absence to that label.
    pub fn build_tree(projects: &[Project], store: &CategoryStore) -> Vec<CategoryNode> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for project in projects {
            let label = store.get(&project.full_path);
            match counts.get_mut(label) {
                Some(count) => *count += 1,
                None => {
                    order.push(label.to_string());
                    counts.insert(label.to_string(), 1);
                }
            }
        }

        let mut nodes: Vec<CategoryNode> = order
            .into_iter()
            .map(|label| {
                let member_count = counts[&label];
                CategoryNode {
                    label,
                    member_count,
                }
            })
            .collect();
        nodes.sort_by(|a, b| collate(&a.label, &b.label));
        nodes
    }

    /// The projects whose resolved label equals the requested category,
    /// sorted by project name. Only identical names tie, and those keep
    /// scan order.
    pub fn projects_in(label: &str, projects: &[Project], store: &CategoryStore) -> Vec<Project> {
        let mut members: Vec<Project> = projects
            .iter()
            .filter(|p| store.get(&p.full_path) == label)
            .cloned()
            .collect();
        members.sort_by(|a, b| collate(&a.name, &b.name));
        members
    }
}
