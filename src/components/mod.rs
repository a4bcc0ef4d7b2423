//! UI Components
//!
//! Reusable Leptos components.

pub mod ui;

mod column_container;
mod create_field_modal;
mod project_tabs;
mod task_details_drawer;
mod task_item;

pub use column_container::ColumnContainer;
pub use create_field_modal::CreateFieldOptionModal;
pub use project_tabs::ProjectTabs;
pub use task_details_drawer::TaskDetailsDrawer;
pub use task_item::{DragOverlay, TaskItem};
