use dioxus::prelude::*;

use crate::domain::services::{PageControl, PageWindow};

/// Previous / page links / next, each requesting a page index
#[component]
pub fn Pagination(window: PageWindow, on_select: EventHandler<u32>) -> Element {
    rsx! {
        nav { class: "c-pagination", aria_label: "Paginación de resultados",
            for (position, control) in window.controls().into_iter().enumerate() {
                PageButton { key: "{position}", control, on_select }
            }
        }
    }
}

#[component]
fn PageButton(control: PageControl, on_select: EventHandler<u32>) -> Element {
    let (label, class, active) = match control {
        PageControl::Previous(_) => ("« Anterior".to_string(), "c-pagination__link c-pagination__link--prev", false),
        PageControl::Next(_) => ("Siguiente »".to_string(), "c-pagination__link c-pagination__link--next", false),
        PageControl::Page { index, active } => {
            let class = if active {
                "c-pagination__link c-pagination__link--active"
            } else {
                "c-pagination__link"
            };
            // zero-based index, one-based label
            ((index + 1).to_string(), class, active)
        }
    };
    let target = control.target();

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            aria_current: if active { "page" } else { "false" },
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                on_select.call(target);
            },
            "{label}"
        }
    }
}
