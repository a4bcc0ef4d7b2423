//! Confirm Dialog Component
//!
//! Modal confirmation with confirm/cancel actions.

use leptos::prelude::*;

/// Modal confirmation dialog
///
/// # Arguments
/// * `open` - whether the dialog is shown
/// * `on_open_change` - called with `false` when the user dismisses the dialog
/// * `on_confirm` - called when the user confirms
/// * `destructive` - render the confirm button in destructive style
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] description: Signal<String>,
    #[prop(into)] confirm_label: String,
    #[prop(optional)] destructive: bool,
    #[prop(into)] on_open_change: Callback<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let confirm_class = if destructive { "btn btn-destructive" } else { "btn btn-primary" };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-overlay" on:click=move |_| on_open_change.run(false)>
                <div class="dialog" role="dialog" on:click=move |ev| ev.stop_propagation()>
                    <h2 class="dialog-title">{move || title.get()}</h2>
                    <p class="dialog-description">{move || description.get()}</p>
                    <div class="dialog-actions">
                        <button class="btn btn-outline" on:click=move |_| on_open_change.run(false)>
                            "Cancel"
                        </button>
                        <button
                            class=confirm_class
                            on:click=move |_| on_confirm.run(())
                        >
                            {confirm_label.clone()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
