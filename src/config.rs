//! Portal configuration
//!
//! `ClientConfig` describes the endpoints the browser talks to.
//! `ServerConfig` (native only) describes the upstreams the hosting proxy forwards to.

/// Page size sent with every search request
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Maximum number of page links shown at once
pub const PAGE_WINDOW_WIDTH: u32 = 5;

/// localStorage key holding the chat thread identifier
pub const THREAD_ID_STORAGE_KEY: &str = "chatThreadId";

/// Public BDNS transparency API
pub const DEFAULT_BDNS_API_URL: &str = "https://www.infosubvenciones.es/bdnstrans/api";

/// Endpoints and limits used by the browser client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Empty for same-origin requests
    pub base_url: String,
    pub search_path: String,
    pub detail_path: String,
    pub chat_path: String,
    pub page_size: u32,
    pub thread_id_key: String,
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, self.search_path)
    }

    /// Detail URL with the identifier percent-encoded as a single path segment
    pub fn detail_url(&self, id: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.detail_path,
            urlencoding::encode(id)
        )
    }

    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            search_path: "/api/buscar".to_string(),
            detail_path: "/api/convocatoria".to_string(),
            chat_path: "/api/chat".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            thread_id_key: THREAD_ID_STORAGE_KEY.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use server::{ServerArgs, ServerConfig};

#[cfg(not(target_arch = "wasm32"))]
mod server {
    use std::time::Duration;

    use clap::Parser;

    use super::DEFAULT_BDNS_API_URL;

    /// Command line flags for the hosting server
    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "subvenciones-portal", about = "Serve the subvenciones portal")]
    pub struct ServerArgs {
        /// Base URL of the BDNS API (env: BDNS_API_URL)
        #[arg(long)]
        pub bdns_api_url: Option<String>,

        /// Base URL of the chat backend (env: CHAT_BACKEND_URL)
        #[arg(long)]
        pub chat_backend_url: Option<String>,

        /// Upstream request timeout in seconds (env: UPSTREAM_TIMEOUT_SECS)
        #[arg(long)]
        pub upstream_timeout_secs: Option<u64>,
    }

    /// Resolved upstream settings for the proxy routes
    #[derive(Debug, Clone, PartialEq)]
    pub struct ServerConfig {
        pub bdns_api_url: String,
        /// `None` disables `/api/chat` (answers 503)
        pub chat_backend_url: Option<String>,
        pub upstream_timeout: Duration,
    }

    impl ServerConfig {
        /// Flags win over environment variables, which win over defaults.
        pub fn resolve(args: ServerArgs, env: impl Fn(&str) -> Option<String>) -> Self {
            let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

            let bdns_api_url = non_empty(args.bdns_api_url)
                .or_else(|| non_empty(env("BDNS_API_URL")))
                .unwrap_or_else(|| DEFAULT_BDNS_API_URL.to_string());

            let chat_backend_url =
                non_empty(args.chat_backend_url).or_else(|| non_empty(env("CHAT_BACKEND_URL")));

            let timeout_secs = args
                .upstream_timeout_secs
                .or_else(|| env("UPSTREAM_TIMEOUT_SECS").and_then(|v| v.parse().ok()))
                .unwrap_or(10);

            Self {
                bdns_api_url: bdns_api_url.trim_end_matches('/').to_string(),
                chat_backend_url: chat_backend_url.map(|url| url.trim_end_matches('/').to_string()),
                upstream_timeout: Duration::from_secs(timeout_secs),
            }
        }

        /// Read flags (ignoring unknown ones injected by the dev server) and the process environment
        pub fn from_env() -> Self {
            let args = ServerArgs::try_parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring command line flags: {}", e);
                ServerArgs::default()
            });
            Self::resolve(args, |key| std::env::var(key).ok())
        }
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self::resolve(ServerArgs::default(), |_| None)
        }
    }
}
