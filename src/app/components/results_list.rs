//! Search result area: info line, result cards and pagination

use dioxus::prelude::*;

use crate::app::components::{EmptyState, ErrorMessage, LoadingText, Pagination};
use crate::domain::models::ConvocatoriaSummary;
use crate::domain::services::SearchView;
use crate::shared::hooks::{DetailState, SearchState};

#[component]
pub fn ResultsSection(search: SearchState, detail: DetailState) -> Element {
    let view = search.controller.read().view().clone();
    if !view.is_visible() {
        return rsx! {};
    }

    let info = view.info_line();
    let pager = search.clone();

    rsx! {
        section { class: "c-results", id: "resultados",
            p { class: "c-results__info", "{info}" }

            {match view {
                SearchView::Loading => rsx! {
                    LoadingText { message: "Buscando convocatorias...".to_string() }
                },
                SearchView::Empty => rsx! {
                    EmptyState {
                        icon: "🔍".to_string(),
                        title: "Sin resultados".to_string(),
                        description: "Prueba con otras palabras clave o amplía el rango de fechas.".to_string(),
                    }
                },
                SearchView::Failed(message) => rsx! {
                    ErrorMessage { message }
                },
                SearchView::Results { page, window } => rsx! {
                    ul { class: "c-results__list",
                        for (index, item) in page.items.into_iter().enumerate() {
                            ResultItem {
                                key: "{index}",
                                item,
                                detail: detail.clone(),
                            }
                        }
                    }
                    if let Some(window) = window {
                        Pagination {
                            window,
                            on_select: move |target: u32| pager.go_to_page(target),
                        }
                    }
                },
                SearchView::Hidden => rsx! {},
            }}
        }
    }
}

#[component]
pub fn ResultItem(item: ConvocatoriaSummary, detail: DetailState) -> Element {
    let title = item.title_or("Sin título");
    let organism = item.organism();
    let date = item.summary_date();
    let badge = item
        .admin_type()
        .map(|admin| (format!("c-badge {}", admin.badge_class()), admin.label().to_string()));
    let bdns = item.bdns();
    let id = item.id();

    rsx! {
        li { class: "c-result-card",
            div { class: "c-result-card__header",
                h3 { class: "c-result-card__title", "{title}" }
                if let Some((badge_class, label)) = badge {
                    span { class: "{badge_class}", "{label}" }
                }
            }
            dl { class: "c-result-card__meta",
                dt { "Organismo" }
                dd { "{organism}" }
                dt { "Fecha" }
                dd { "{date}" }
                if let Some(bdns) = bdns {
                    dt { "BDNS" }
                    dd { "{bdns}" }
                }
            }
            if let Some(id) = id {
                button {
                    class: "c-button c-button--secondary c-result-card__details",
                    r#type: "button",
                    onclick: move |_| detail.open(id.clone()),
                    "Ver detalles"
                }
            }
        }
    }
}
