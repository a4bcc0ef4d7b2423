//! UI Primitives

mod confirm_dialog;
mod input;
mod toaster;

pub use confirm_dialog::ConfirmDialog;
pub use input::TextInput;
pub use toaster::Toaster;
