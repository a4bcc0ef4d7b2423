//! Board State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::HashSet;

use leptos::prelude::*;
use reactive_stores::Store;
use uuid::Uuid;

use crate::board::{self, DropMove, TaskChanges, TaskSlot};
use crate::models::{Status, Task};

/// Local copy of one project's board
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Columns in display order
    pub columns: Vec<Status>,
    /// Client-only hidden columns
    pub hidden_columns: HashSet<Uuid>,
    /// All tasks of the project
    pub tasks: Vec<Task>,
    /// A full task reload is in flight
    pub reloading: bool,
}

impl BoardState {
    pub fn new(columns: Vec<Status>, tasks: Vec<Task>) -> Self {
        Self {
            columns,
            tasks,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type BoardStore = Store<BoardState>;

/// Get the board store from context
pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_add_column(store: &BoardStore, column: Status) {
    store.columns().write().push(column);
}

/// Replace a column in place by ID
pub fn store_update_column(store: &BoardStore, updated: Status) {
    if let Some(column) = store.columns().write().iter_mut().find(|c| c.id == updated.id) {
        *column = updated;
    }
}

pub fn store_remove_column(store: &BoardStore, column_id: Uuid) {
    store.columns().write().retain(|c| c.id != column_id);
    store.hidden_columns().write().remove(&column_id);
}

pub fn store_hide_column(store: &BoardStore, column_id: Uuid) {
    store.hidden_columns().write().insert(column_id);
}

pub fn store_show_hidden_columns(store: &BoardStore) {
    store.hidden_columns().write().clear();
}

pub fn store_add_task(store: &BoardStore, task: Task) {
    store.tasks().write().push(task);
}

pub fn store_set_tasks(store: &BoardStore, tasks: Vec<Task>) {
    *store.tasks().write() = tasks;
}

/// Apply an optimistic drop; returns the moved tasks' previous slots
pub fn store_apply_drop(store: &BoardStore, mv: &DropMove) -> Vec<TaskSlot> {
    board::apply_drop(&mut store.tasks().write(), mv)
}

/// Roll back a drop the backend rejected
pub fn store_revert_drop(store: &BoardStore, mv: &DropMove, previous: &[TaskSlot]) {
    board::revert_drop(&mut store.tasks().write(), mv, previous);
}

/// The task with the selected id. Edits to other tasks do not notify.
pub fn store_task_memo(store: BoardStore, selected: Signal<Option<Uuid>>) -> Memo<Option<Task>> {
    Memo::new(move |_| {
        let id = selected.get()?;
        store.tasks().with(|tasks| tasks.iter().find(|t| t.id == id).cloned())
    })
}

/// Mark a full reload as running. Returns `false` if one already is.
pub fn store_begin_reload(store: &BoardStore) -> bool {
    if store.reloading().get_untracked() {
        return false;
    }
    store.reloading().set(true);
    true
}

pub fn store_end_reload(store: &BoardStore) {
    store.reloading().set(false);
}

pub fn store_patch_task(store: &BoardStore, task_id: Uuid, changes: &TaskChanges) {
    board::patch_task(&mut store.tasks().write(), task_id, changes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TODO: Uuid = Uuid::from_u128(100);
    const DONE: Uuid = Uuid::from_u128(200);

    fn make_task(n: u128, position: f64) -> Task {
        Task {
            id: Uuid::from_u128(n),
            project_id: Uuid::from_u128(1),
            status_id: Some(TODO),
            status_position: position,
            title: format!("Task {}", n),
            description: None,
            labels: Vec::new(),
            size: None,
            priority: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, n as u32).unwrap(),
        }
    }

    fn slot(store: &BoardStore, n: u128) -> (Option<Uuid>, f64) {
        store.tasks().with_untracked(|tasks| {
            let task = tasks.iter().find(|t| t.id.as_u128() == n).unwrap();
            (task.status_id, task.status_position)
        })
    }

    #[test]
    fn test_reload_is_single_flight() {
        let owner = Owner::new();
        owner.with(|| {
            let store: BoardStore = Store::new(BoardState::default());

            assert!(store_begin_reload(&store));
            assert!(!store_begin_reload(&store));

            store_end_reload(&store);
            assert!(store_begin_reload(&store));
        });
    }

    #[test]
    fn test_overlapping_drops_revert_only_the_failed_one() {
        let owner = Owner::new();
        owner.with(|| {
            let store: BoardStore =
                Store::new(BoardState::new(Vec::new(), vec![make_task(1, 1024.0), make_task(2, 2048.0)]));

            let sorted = store.tasks().with_untracked(|t| board::sort_tasks(t));
            let first = board::resolve_drop(&sorted, Uuid::from_u128(1), DONE, 0).unwrap();
            let first_previous = store_apply_drop(&store, &first);

            let sorted = store.tasks().with_untracked(|t| board::sort_tasks(t));
            let second = board::resolve_drop(&sorted, Uuid::from_u128(2), DONE, 1).unwrap();
            store_apply_drop(&store, &second);

            // First save fails after the second one succeeded
            store_revert_drop(&store, &first, &first_previous);

            assert_eq!(slot(&store, 1), (Some(TODO), 1024.0));
            assert_eq!(slot(&store, 2), (Some(DONE), second.status_position));
        });
    }

    #[test]
    fn test_selected_task_ignores_other_tasks() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let owner = Owner::new();
        owner.with(|| {
            let store: BoardStore =
                Store::new(BoardState::new(Vec::new(), vec![make_task(1, 1024.0), make_task(2, 2048.0)]));
            let (selected, _) = signal(Some(Uuid::from_u128(1)));
            let task = store_task_memo(store, selected.into());

            let rebuilds = Arc::new(AtomicUsize::new(0));
            let view = {
                let rebuilds = rebuilds.clone();
                Memo::new(move |_| {
                    rebuilds.fetch_add(1, Ordering::SeqCst);
                    task.get().map(|t| t.title)
                })
            };

            assert_eq!(view.get().as_deref(), Some("Task 1"));
            assert_eq!(rebuilds.load(Ordering::SeqCst), 1);

            store_add_task(&store, make_task(3, 3072.0));
            store_patch_task(&store, Uuid::from_u128(2), &TaskChanges {
                title: Some("Renamed".to_string()),
                ..Default::default()
            });
            assert_eq!(view.get().as_deref(), Some("Task 1"));
            assert_eq!(rebuilds.load(Ordering::SeqCst), 1);

            store_patch_task(&store, Uuid::from_u128(1), &TaskChanges {
                title: Some("Edited".to_string()),
                ..Default::default()
            });
            assert_eq!(view.get().as_deref(), Some("Edited"));
            assert_eq!(rebuilds.load(Ordering::SeqCst), 2);
        });
    }

    #[test]
    fn test_hidden_columns_are_cleared_on_delete() {
        let owner = Owner::new();
        owner.with(|| {
            let store: BoardStore = Store::new(BoardState::default());
            store_hide_column(&store, TODO);
            store_remove_column(&store, TODO);
            assert!(store.hidden_columns().with_untracked(|h| h.is_empty()));
        });
    }
}
