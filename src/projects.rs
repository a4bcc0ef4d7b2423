//! Project List Utilities
//!
//! Search, sort and active/closed split for the projects page.

use std::cmp::Reverse;

use uuid::Uuid;

use crate::models::Project;

/// Sort order for the project list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
        }
    }
}

/// Field changes merged into a cached project
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub closed: Option<bool>,
}

impl ProjectChanges {
    pub fn closed(closed: bool) -> Self {
        Self {
            closed: Some(closed),
            ..Default::default()
        }
    }
}

/// Keep projects whose "name description" contains `search` (case-insensitive),
/// ordered by creation time.
pub fn filter_and_sort(projects: &[Project], search: &str, order: SortOrder) -> Vec<Project> {
    let needle = search.to_lowercase();
    let mut filtered: Vec<Project> = projects
        .iter()
        .filter(|p| {
            format!("{} {}", p.name, p.description)
                .to_lowercase()
                .contains(&needle)
        })
        .cloned()
        .collect();

    match order {
        SortOrder::Newest => filtered.sort_by_key(|p| Reverse(p.created_at)),
        SortOrder::Oldest => filtered.sort_by_key(|p| p.created_at),
    }
    filtered
}

/// Split into (active, closed), preserving order
pub fn partition(filtered: &[Project]) -> (Vec<Project>, Vec<Project>) {
    filtered.iter().cloned().partition(|p| !p.closed)
}

/// Merge `changes` into the project with `id`
pub fn apply_changes(list: &mut [Project], id: Uuid, changes: &ProjectChanges) {
    if let Some(project) = list.iter_mut().find(|p| p.id == id) {
        if let Some(name) = &changes.name {
            project.name = name.clone();
        }
        if let Some(description) = &changes.description {
            project.description = description.clone();
        }
        if let Some(closed) = changes.closed {
            project.closed = closed;
        }
    }
}

/// Drop the project with `id`
pub fn remove(list: &mut Vec<Project>, id: Uuid) {
    list.retain(|p| p.id != id);
}
