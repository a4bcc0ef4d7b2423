//! Application Context
//!
//! Shared state provided via Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::board::TaskChanges;

/// How long a toast stays on screen
const TOAST_TTL_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub variant: ToastVariant,
    pub title: String,
    pub description: String,
}

/// App-wide toast queue
#[derive(Clone, Copy)]
pub struct ToastContext {
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl ToastContext {
    pub fn new() -> Self {
        let (toasts, set_toasts) = signal(Vec::new());
        Self {
            toasts,
            set_toasts,
            next_id: StoredValue::new(0),
        }
    }

    pub fn show(&self, variant: ToastVariant, title: &str, description: &str) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.set_toasts.update(|list| {
            list.push(Toast {
                id,
                variant,
                title: title.to_string(),
                description: description.to_string(),
            })
        });

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            ctx.dismiss(id);
        });
    }

    pub fn success(&self, description: &str) {
        self.show(ToastVariant::Default, "Success", description);
    }

    pub fn error(&self, description: &str) {
        self.show(ToastVariant::Destructive, "Error", description);
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}

/// Board-wide signals shared with the task details drawer
#[derive(Clone, Copy)]
pub struct TaskDetailsContext {
    /// Task shown in the drawer - read
    pub selected_task: ReadSignal<Option<Uuid>>,
    /// Task shown in the drawer - write
    set_selected_task: WriteSignal<Option<Uuid>>,
    /// Called after a task was saved to the backend
    pub on_task_update: Callback<(Uuid, TaskChanges)>,
}

impl TaskDetailsContext {
    pub fn new(
        selected_task: (ReadSignal<Option<Uuid>>, WriteSignal<Option<Uuid>>),
        on_task_update: Callback<(Uuid, TaskChanges)>,
    ) -> Self {
        Self {
            selected_task: selected_task.0,
            set_selected_task: selected_task.1,
            on_task_update,
        }
    }

    pub fn open(&self, task_id: Uuid) {
        self.set_selected_task.set(Some(task_id));
    }

    pub fn close(&self) {
        self.set_selected_task.set(None);
    }
}

pub fn use_task_details() -> TaskDetailsContext {
    expect_context::<TaskDetailsContext>()
}
