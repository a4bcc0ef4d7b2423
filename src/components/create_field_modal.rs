//! Create Custom Field Option Modal
//!
//! Trigger button plus a modal form collecting label, description and color.

use leptos::prelude::*;

use crate::components::ui::TextInput;
use crate::models::CustomFieldData;

const DEFAULT_COLOR: &str = "#64748b";

/// Validate and trim the form fields
pub fn build_field_data(label: &str, description: &str, color: &str) -> Option<CustomFieldData> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    let color = color.trim();
    Some(CustomFieldData {
        label: label.to_string(),
        description: description.trim().to_string(),
        color: if color.is_empty() { DEFAULT_COLOR.to_string() } else { color.to_string() },
    })
}

#[component]
pub fn CreateFieldOptionModal(
    #[prop(into)] title: String,
    #[prop(into)] disabled: Signal<bool>,
    on_submit: Callback<CustomFieldData>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let (label, set_label) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (color, set_color) = signal(DEFAULT_COLOR.to_string());

    let reset = move || {
        set_label.set(String::new());
        set_description.set(String::new());
        set_color.set(DEFAULT_COLOR.to_string());
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(data) = build_field_data(&label.get(), &description.get(), &color.get()) else {
            return;
        };
        on_submit.run(data);
        reset();
        set_open.set(false);
    };

    view! {
        <button
            class="btn btn-secondary add-column-btn"
            title=title.clone()
            prop:disabled=move || disabled.get()
            on:click=move |_| set_open.set(true)
        >
            "+"
        </button>

        <Show when=move || open.get()>
            <div class="dialog-overlay" on:click=move |_| set_open.set(false)>
                <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=submit>
                    <h2 class="dialog-title">{title.clone()}</h2>
                    <label>"Label"</label>
                    <TextInput value=label set_value=set_label placeholder="e.g. In Review" />
                    <label>"Description"</label>
                    <TextInput value=description set_value=set_description placeholder="Optional" />
                    <label>"Color"</label>
                    <TextInput value=color set_value=set_color input_type="color" />
                    <div class="dialog-actions">
                        <button type="button" class="btn btn-outline" on:click=move |_| set_open.set(false)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary">"Create"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_field_data() {
        assert_eq!(build_field_data("   ", "x", "#fff"), None);

        let data = build_field_data(" Review ", " waiting on QA ", "").unwrap();
        assert_eq!(data.label, "Review");
        assert_eq!(data.description, "waiting on QA");
        assert_eq!(data.color, DEFAULT_COLOR);
    }
}
