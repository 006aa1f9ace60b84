//! Subvenciones portal entry point
//!
//! The server build serves the Dioxus app plus the proxy routes through
//! `dioxus::serve()` so it stays compatible with `dx serve`.

use subvenciones_portal::app::App;

// Server entry point - NO #[tokio::main], dioxus::serve() creates its own runtime
#[cfg(feature = "server")]
fn main() {
    // IMPORTANT: Use dioxus::server::axum, NOT axum directly
    use dioxus::server::axum::{
        Extension,
        routing::{get, post},
    };
    use subvenciones_portal::config::ServerConfig;
    use subvenciones_portal::handlers::{ProxyState, chat_handler, detail_handler, search_handler};
    use tower_http::trace::TraceLayer;

    // Initialize tracing BEFORE dioxus::serve
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        bdns_api_url = %config.bdns_api_url,
        chat_enabled = config.chat_backend_url.is_some(),
        "Starting subvenciones portal..."
    );
    if config.chat_backend_url.is_none() {
        tracing::warn!("CHAT_BACKEND_URL not set - /api/chat will answer 503");
    }

    dioxus::serve(move || {
        let config = config.clone();
        async move {
            let state = ProxyState::new(config)?;

            // NOTE: Axum 0.8 uses {param} syntax instead of :param
            let router = dioxus::server::router(App)
                .route("/api/buscar", get(search_handler))
                .route("/api/convocatoria/{id}", get(detail_handler))
                .route("/api/chat", post(chat_handler))
                .layer(Extension(state))
                .layer(TraceLayer::new_for_http());

            Ok(router)
        }
    });
}

// WASM entry point (browser) - no server feature
#[cfg(all(not(feature = "server"), target_arch = "wasm32"))]
fn main() {
    web_sys::console::log_1(&"[WASM] Subvenciones portal initialized".into());
    dioxus::launch(App);
}

// Native client (desktop) - no server feature, not WASM
#[cfg(all(not(feature = "server"), not(target_arch = "wasm32")))]
fn main() {
    dioxus::launch(App);
}
