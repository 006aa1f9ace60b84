//! Advanced search form

use dioxus::prelude::*;

use crate::domain::models::{AdminType, DescriptionMatch};
use crate::shared::hooks::SearchState;

#[component]
pub fn SearchFormPanel(state: SearchState) -> Element {
    let mut form = state.form;
    let current = form.read().clone();
    let is_loading = state.controller.read().view().is_loading();

    let submit_state = state.clone();
    let reset_state = state.clone();

    rsx! {
        form {
            class: "c-search-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                submit_state.go_to_page(0);
            },

            div { class: "c-search-form__row",
                label { class: "c-search-form__label", r#for: "descripcion", "Descripción" }
                input {
                    id: "descripcion",
                    class: "c-search-form__input",
                    r#type: "text",
                    placeholder: "Palabras clave de la convocatoria",
                    value: "{current.descripcion}",
                    oninput: move |evt| form.write().descripcion = evt.value(),
                }
            }

            div { class: "c-search-form__row",
                label { class: "c-search-form__label", r#for: "descripcionTipoBusqueda", "Tipo de búsqueda" }
                select {
                    id: "descripcionTipoBusqueda",
                    class: "c-search-form__select",
                    value: "{current.descripcion_tipo_busqueda}",
                    onchange: move |evt| form.write().descripcion_tipo_busqueda = evt.value(),
                    for option_match in DescriptionMatch::ALL {
                        option {
                            value: option_match.code(),
                            selected: current.descripcion_tipo_busqueda == option_match.code(),
                            {option_match.label()}
                        }
                    }
                }
            }

            div { class: "c-search-form__row c-search-form__row--dates",
                div { class: "c-search-form__field",
                    label { class: "c-search-form__label", r#for: "fechaDesde", "Desde" }
                    input {
                        id: "fechaDesde",
                        class: "c-search-form__input",
                        r#type: "date",
                        value: "{current.fecha_desde}",
                        oninput: move |evt| form.write().fecha_desde = evt.value(),
                    }
                }
                div { class: "c-search-form__field",
                    label { class: "c-search-form__label", r#for: "fechaHasta", "Hasta" }
                    input {
                        id: "fechaHasta",
                        class: "c-search-form__input",
                        r#type: "date",
                        value: "{current.fecha_hasta}",
                        oninput: move |evt| form.write().fecha_hasta = evt.value(),
                    }
                }
            }

            div { class: "c-search-form__row",
                label { class: "c-search-form__label", r#for: "tipoAdministracion", "Administración" }
                select {
                    id: "tipoAdministracion",
                    class: "c-search-form__select",
                    value: "{current.tipo_administracion}",
                    onchange: move |evt| form.write().tipo_administracion = evt.value(),
                    option { value: "", selected: current.tipo_administracion.is_empty(), "Todas" }
                    for admin in AdminType::KNOWN {
                        option {
                            value: admin.code(),
                            selected: current.tipo_administracion == admin.code(),
                            {admin.label()}
                        }
                    }
                }
            }

            div { class: "c-search-form__actions",
                button {
                    class: "c-button c-button--primary",
                    r#type: "submit",
                    disabled: is_loading,
                    if is_loading { "Buscando..." } else { "Buscar" }
                }
                button {
                    class: "c-button c-button--secondary",
                    r#type: "button",
                    onclick: move |_| reset_state.reset(),
                    "Limpiar"
                }
            }
        }
    }
}
