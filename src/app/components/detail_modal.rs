//! Convocatoria detail modal

use dioxus::prelude::*;

use crate::app::components::{EmptyState, ErrorMessage, LoadingText};
use crate::domain::models::ConvocatoriaDetail;
use crate::domain::services::DetailView;
use crate::domain::services::fields::NOT_SPECIFIED;
use crate::domain::services::render::render_or_plain;
use crate::shared::hooks::DetailState;

#[component]
pub fn DetailModal(detail: DetailState) -> Element {
    let view = detail.controller.read().view().clone();
    if !view.is_open() {
        return rsx! {};
    }

    let title = view.title();
    let close_backdrop = detail.clone();
    let close_button = detail.clone();
    let close_footer = detail.clone();

    rsx! {
        div {
            class: "c-modal",
            role: "dialog",
            aria_modal: "true",
            onclick: move |_| close_backdrop.close(),

            div {
                class: "c-modal__dialog",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),

                header { class: "c-modal__header",
                    h2 { class: "c-modal__title", "{title}" }
                    button {
                        class: "c-modal__close",
                        r#type: "button",
                        aria_label: "Cerrar",
                        onclick: move |_| close_button.close(),
                        "×"
                    }
                }

                div { class: "c-modal__body",
                    {match view {
                        DetailView::Loading => rsx! {
                            LoadingText { message: "Cargando detalles...".to_string() }
                        },
                        DetailView::Loaded(record) => rsx! {
                            DetailBody { record }
                        },
                        DetailView::NotFound => rsx! {
                            EmptyState {
                                icon: "📄".to_string(),
                                title: "No se encontraron detalles para esta convocatoria.".to_string(),
                            }
                        },
                        DetailView::Failed(message) => rsx! {
                            ErrorMessage { message }
                        },
                        DetailView::Closed => rsx! {},
                    }}
                }

                footer { class: "c-modal__footer",
                    button {
                        class: "c-button c-button--secondary",
                        r#type: "button",
                        onclick: move |_| close_footer.close(),
                        "Cerrar"
                    }
                }
            }
        }
    }
}

#[component]
fn DetailBody(record: ConvocatoriaDetail) -> Element {
    let bdns = record.bdns().unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let organism = record.organism();
    let published = record.published_date();
    let deadline_start = record.deadline_start();
    let deadline_end = record.deadline_end();
    let description = record.description();
    let beneficiaries = record.beneficiaries();
    // Some API versions send the amount as markup
    let amount_html = record.amount().map(|amount| render_or_plain(&amount));
    let external_url = record.external_url();

    rsx! {
        dl { class: "c-detail",
            dt { class: "c-detail__label", "Código BDNS" }
            dd { class: "c-detail__value", "{bdns}" }

            dt { class: "c-detail__label", "Organismo" }
            dd { class: "c-detail__value", "{organism}" }

            dt { class: "c-detail__label", "Fecha de publicación" }
            dd { class: "c-detail__value", "{published}" }

            if deadline_start.is_some() || deadline_end.is_some() {
                dt { class: "c-detail__label", "Plazo de solicitud" }
                dd { class: "c-detail__value",
                    {format!(
                        "{} - {}",
                        deadline_start.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                        deadline_end.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                    )}
                }
            }

            if let Some(description) = description {
                dt { class: "c-detail__label", "Objeto" }
                dd { class: "c-detail__value u-whitespace-pre-wrap", "{description}" }
            }

            if let Some(beneficiaries) = beneficiaries {
                dt { class: "c-detail__label", "Beneficiarios" }
                dd { class: "c-detail__value", "{beneficiaries}" }
            }

            if let Some(amount_html) = amount_html {
                dt { class: "c-detail__label", "Cuantía" }
                dd { class: "c-detail__value c-prose c-prose--sm", dangerous_inner_html: "{amount_html}" }
            }

            if let Some(url) = external_url {
                dt { class: "c-detail__label", "Más información" }
                dd { class: "c-detail__value",
                    a { href: "{url}", target: "_blank", rel: "noopener noreferrer", "{url}" }
                }
            }
        }
    }
}
