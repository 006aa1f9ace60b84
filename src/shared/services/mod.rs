// HTTP clients implementing `PortalApi`

#[cfg(target_arch = "wasm32")]
pub mod browser_api;
#[cfg(not(target_arch = "wasm32"))]
pub mod native_api;

#[cfg(target_arch = "wasm32")]
pub use browser_api::BrowserPortalApi as DefaultPortalApi;
#[cfg(not(target_arch = "wasm32"))]
pub use native_api::NativePortalApi as DefaultPortalApi;

/// Error text for a non-2xx response: the body when it has one, else the status text
pub fn error_message(body: &str, status_text: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status_text.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(error_message("Fallo del backend\n", "Bad Gateway"), "Fallo del backend");
        assert_eq!(error_message("  ", "Bad Gateway"), "Bad Gateway");
    }
}
