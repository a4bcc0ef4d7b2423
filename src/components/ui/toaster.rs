//! Toaster Component
//!
//! Renders the toast queue from `ToastContext`.

use leptos::prelude::*;

use crate::context::{use_toast, ToastVariant};

#[component]
pub fn Toaster() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toaster">
            <For
                each=move || toast.toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    let class = match t.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Destructive => "toast destructive",
                    };
                    view! {
                        <div class=class role="status">
                            <div class="toast-title">{t.title}</div>
                            <div class="toast-description">{t.description}</div>
                            <button class="toast-close" on:click=move |_| toast.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
