use dioxus::prelude::*;

// Reusable Loading Component (BEM: c-loading)
#[component]
pub fn LoadingText(message: String) -> Element {
    rsx! {
        div { class: "c-loading",
            div { class: "c-loading__spinner" }
            p { class: "c-loading__text", "{message}" }
        }
    }
}

// Reusable Error Message Component (BEM: c-error)
#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "c-error", role: "alert",
            span { class: "c-error__icon", "⚠️" }
            p { class: "c-error__text", "{message}" }
        }
    }
}

/// Neutral "nothing here" notice, not styled as an error
#[component]
pub fn EmptyState(icon: String, title: String, description: Option<String>) -> Element {
    rsx! {
        div { class: "c-empty-state",
            div { class: "c-empty-state__icon", "{icon}" }
            h3 { class: "c-empty-state__title", "{title}" }
            if let Some(description) = description {
                p { class: "c-empty-state__description", "{description}" }
            }
        }
    }
}
