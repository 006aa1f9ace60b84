use dioxus::document;
use dioxus::prelude::*;

use crate::app::components::{ChatPanel, DetailModal, ResultsSection, SearchFormPanel};
use crate::shared::hooks::{PortalClient, use_detail, use_search};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
    #[route("/")]
    Home {},
}

#[component]
pub fn App() -> Element {
    use_context_provider(PortalClient::default);

    use_effect(|| {
        tracing::info!("Subvenciones portal initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Layout() -> Element {
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    rsx! {
        document::Title { "Buscador de subvenciones" }
        document::Link { rel: "stylesheet", href: BUNDLE_CSS }
        div { class: "c-layout",
            header { class: "c-navbar",
                h1 { class: "c-navbar__brand", "Buscador de subvenciones" }
                span { class: "c-navbar__subtitle", "Base de Datos Nacional de Subvenciones" }
            }
            main { class: "c-layout__main",
                Outlet::<Route> {}
            }
        }
    }
}

/// Search, results, detail modal and chat on one page
#[component]
fn Home() -> Element {
    let search = use_search();
    let detail = use_detail();

    rsx! {
        div { class: "c-portal",
            section { class: "c-portal__search",
                SearchFormPanel { state: search.clone() }
                ResultsSection { search: search.clone(), detail: detail.clone() }
            }
            ChatPanel {}
        }
        DetailModal { detail }
    }
}
