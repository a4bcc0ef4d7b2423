//! Text Input
//!
//! Styled text input with two-way binding to a signal.

use leptos::prelude::*;

const INPUT_CLASS: &str = "input";

#[component]
pub fn TextInput(
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(optional)] disabled: Option<Signal<bool>>,
) -> impl IntoView {
    let class = if class.is_empty() {
        INPUT_CLASS.to_string()
    } else {
        format!("{} {}", INPUT_CLASS, class)
    };

    view! {
        <input
            type=input_type
            class=class
            placeholder=placeholder
            prop:value=move || value.get()
            prop:disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
            on:input=move |ev| set_value.set(event_target_value(&ev))
        />
    }
}
