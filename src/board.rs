//! Board Utilities
//!
//! Task ordering, drop positioning and update planning for the kanban board.

use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{CustomFieldOption, Status, Task};

/// Ordering gap used when appending to a column
pub const POSITION_STEP: f64 = 1024.0;

/// Sort all tasks by their column position (ties broken by creation time)
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        a.status_position
            .total_cmp(&b.status_position)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    sorted
}

/// Tasks belonging to one column, keeping the incoming order
pub fn column_tasks(sorted: &[Task], status_id: Uuid) -> Vec<Task> {
    sorted
        .iter()
        .filter(|t| t.status_id == Some(status_id))
        .cloned()
        .collect()
}

/// Columns minus the locally hidden ones
pub fn visible_columns(columns: &[Status], hidden: &HashSet<Uuid>) -> Vec<Status> {
    columns
        .iter()
        .filter(|c| !hidden.contains(&c.id))
        .cloned()
        .collect()
}

/// Keys closer than this are treated as colliding and the column is renumbered
pub const MIN_POSITION_GAP: f64 = 1e-6;

/// Ordering key for a task dropped at `index` of `column` (sorted), or
/// `None` when the neighbouring keys leave no usable gap.
///
/// The dragged task is skipped when it already sits in the column, so the
/// index refers to the column as seen without it.
pub fn position_for_drop(column: &[Task], index: usize, dragged: Uuid) -> Option<f64> {
    let others: Vec<f64> = column
        .iter()
        .filter(|t| t.id != dragged)
        .map(|t| t.status_position)
        .collect();

    let index = index.min(others.len());
    let prev = index.checked_sub(1).map(|i| others[i]);
    match (prev, others.get(index).copied()) {
        (None, None) => Some(POSITION_STEP),
        (Some(prev), None) => Some(prev + POSITION_STEP),
        (prev, Some(next)) => {
            let lower = prev.unwrap_or(0.0);
            let mid = (lower + next) / 2.0;
            (next - lower >= MIN_POSITION_GAP && mid > lower && mid < next).then_some(mid)
        }
    }
}

/// Evenly spaced keys for the column with `dragged` inserted at `index`.
/// Returns the dragged task's key and the other tasks whose key changes.
pub fn renumber_column(column: &[Task], index: usize, dragged: Uuid) -> (f64, Vec<(Uuid, f64)>) {
    let mut order: Vec<(Uuid, f64)> = column
        .iter()
        .filter(|t| t.id != dragged)
        .map(|t| (t.id, t.status_position))
        .collect();
    let index = index.min(order.len());
    order.insert(index, (dragged, f64::NAN));

    let mut dragged_position = POSITION_STEP;
    let mut renumbered = Vec::new();
    for (i, (id, old)) in order.into_iter().enumerate() {
        let key = (i + 1) as f64 * POSITION_STEP;
        if id == dragged {
            dragged_position = key;
        } else if old != key {
            renumbered.push((id, key));
        }
    }
    (dragged_position, renumbered)
}

/// Column and key of one task
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskSlot {
    pub task_id: Uuid,
    pub status_id: Option<Uuid>,
    pub status_position: f64,
}

/// A resolved card move
#[derive(Debug, Clone, PartialEq)]
pub struct DropMove {
    pub task_id: Uuid,
    pub status_id: Uuid,
    pub status_position: f64,
    /// Neighbours re-keyed in the target column when its gaps ran out
    pub renumbered: Vec<(Uuid, f64)>,
}

impl DropMove {
    /// Every slot this move assigns, dragged task first
    pub fn slots(&self) -> Vec<TaskSlot> {
        let dragged = TaskSlot {
            task_id: self.task_id,
            status_id: Some(self.status_id),
            status_position: self.status_position,
        };
        std::iter::once(dragged)
            .chain(self.renumbered.iter().map(|(id, position)| TaskSlot {
                task_id: *id,
                status_id: Some(self.status_id),
                status_position: *position,
            }))
            .collect()
    }
}

/// Resolve a drop of `task_id` into column `status_id` at `index`.
/// Returns `None` when nothing would change.
pub fn resolve_drop(sorted: &[Task], task_id: Uuid, status_id: Uuid, index: usize) -> Option<DropMove> {
    let task = sorted.iter().find(|t| t.id == task_id)?;
    let column = column_tasks(sorted, status_id);

    if task.status_id == Some(status_id) {
        let current = column.iter().position(|t| t.id == task_id);
        if current == Some(index.min(column.len().saturating_sub(1))) {
            return None;
        }
    }

    let (status_position, renumbered) = match position_for_drop(&column, index, task_id) {
        Some(position) => (position, Vec::new()),
        None => renumber_column(&column, index, task_id),
    };

    Some(DropMove {
        task_id,
        status_id,
        status_position,
        renumbered,
    })
}

fn slot_of(task: &Task) -> TaskSlot {
    TaskSlot {
        task_id: task.id,
        status_id: task.status_id,
        status_position: task.status_position,
    }
}

/// Optimistically patch column and position of the moved tasks.
/// Returns their previous slots for `revert_drop`.
pub fn apply_drop(tasks: &mut [Task], mv: &DropMove) -> Vec<TaskSlot> {
    let mut previous = Vec::new();
    for slot in mv.slots() {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == slot.task_id) {
            previous.push(slot_of(task));
            task.status_id = slot.status_id;
            task.status_position = slot.status_position;
        }
    }
    previous
}

/// Undo a rejected drop. Only tasks still sitting where this drop put them
/// are restored; anything moved or reloaded since is left alone.
pub fn revert_drop(tasks: &mut [Task], mv: &DropMove, previous: &[TaskSlot]) {
    let assigned = mv.slots();
    for prev in previous {
        let Some(slot) = assigned.iter().find(|s| s.task_id == prev.task_id) else {
            continue;
        };
        if let Some(task) = tasks.iter_mut().find(|t| t.id == prev.task_id) {
            if slot_of(task) == *slot {
                task.status_id = prev.status_id;
                task.status_position = prev.status_position;
            }
        }
    }
}

/// Partial task update coming from the details drawer or a drop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status_id: Option<Uuid>,
    pub status_position: Option<f64>,
    pub labels: Option<Vec<CustomFieldOption>>,
    pub size: Option<Option<CustomFieldOption>>,
    pub priority: Option<Option<CustomFieldOption>>,
}

impl TaskChanges {
    /// Whether the change touches fields resolved from other tables
    pub fn touches_options(&self) -> bool {
        self.labels.is_some() || self.size.is_some() || self.priority.is_some()
    }
}

/// How the board reconciles a task update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePlan {
    /// Merge fields into the cached task
    Patch,
    /// Re-fetch the whole task list
    Reload,
}

pub fn plan_task_update(changes: &TaskChanges) -> UpdatePlan {
    if changes.touches_options() {
        UpdatePlan::Reload
    } else {
        UpdatePlan::Patch
    }
}

/// Merge plain fields into the task with `id`
pub fn patch_task(tasks: &mut [Task], id: Uuid, changes: &TaskChanges) {
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return;
    };
    if let Some(title) = &changes.title {
        task.title = title.clone();
    }
    if let Some(description) = &changes.description {
        task.description = Some(description.clone());
    }
    if let Some(status_id) = changes.status_id {
        task.status_id = Some(status_id);
    }
    if let Some(position) = changes.status_position {
        task.status_position = position;
    }
}
