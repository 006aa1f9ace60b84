//! Pass-through routes backing the portal's three endpoints

use std::collections::HashMap;

use axum::{
    Extension,
    body::Body,
    extract::{Path, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use reqwest::Client;

use crate::config::ServerConfig;
use crate::domain::models::ChatRequest;
use crate::shared::logging;

/// Search parameters forwarded upstream, in upstream order
const SEARCH_PARAMS: [&str; 7] = [
    "page",
    "pageSize",
    "descripcion",
    "descripcionTipoBusqueda",
    "fechaDesde",
    "fechaHasta",
    "tipoAdministracion",
];

pub const CHAT_UNAVAILABLE: &str = "El servicio de chat inteligente no está disponible.";
pub const EMPTY_QUERY: &str = "La consulta es obligatoria";

/// Upstream settings plus a shared HTTP client
#[derive(Clone)]
pub struct ProxyState {
    pub config: ServerConfig,
    pub client: Client,
}

impl ProxyState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .connect_timeout(config.upstream_timeout)
            .build()
            .context("Failed to build upstream HTTP client")?;
        Ok(Self { config, client })
    }
}

/// Known parameters only, empty values dropped; match mode defaults to all words
pub fn upstream_search_params(query: &HashMap<String, String>) -> Vec<(String, String)> {
    SEARCH_PARAMS
        .iter()
        .filter_map(|&key| {
            let value = match query.get(key).map(|v| v.trim()) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ if key == "descripcionTipoBusqueda" => "1".to_string(),
                _ => return None,
            };
            Some((key.to_string(), value))
        })
        .collect()
}

fn bad_gateway(route: &str, error: impl std::fmt::Display) -> Response {
    logging::log_proxy_error(route, &error.to_string());
    (StatusCode::BAD_GATEWAY, format!("Error al contactar con el servicio externo: {}", error))
        .into_response()
}

/// Forward a JSON response, preserving a non-2xx status as 502
async fn relay_json(route: &str, response: reqwest::Response) -> Response {
    let status = response.status();
    if !status.is_success() {
        return bad_gateway(route, format!("upstream answered {}", status));
    }
    match response.bytes().await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "application/json")], bytes).into_response(),
        Err(e) => bad_gateway(route, e),
    }
}

/// GET /api/buscar
pub async fn search_handler(
    Extension(state): Extension<ProxyState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let url = format!("{}/convocatorias/busqueda", state.config.bdns_api_url);
    logging::log_proxy_request("/api/buscar", &url);

    let params = upstream_search_params(&query);
    let request = state
        .client
        .get(&url)
        .query(&params)
        .timeout(state.config.upstream_timeout);
    match request.send().await {
        Ok(response) => relay_json("/api/buscar", response).await,
        Err(e) => bad_gateway("/api/buscar", e),
    }
}

/// GET /api/convocatoria/{id}
pub async fn detail_handler(
    Extension(state): Extension<ProxyState>,
    Path(id): Path<String>,
) -> Response {
    let url = format!("{}/convocatorias", state.config.bdns_api_url);
    logging::log_proxy_request("/api/convocatoria", &url);

    let request = state
        .client
        .get(&url)
        .query(&[("numConv", id.as_str())])
        .timeout(state.config.upstream_timeout);
    match request.send().await {
        Ok(response) => relay_json("/api/convocatoria", response).await,
        Err(e) => bad_gateway("/api/convocatoria", e),
    }
}

/// POST /api/chat, streamed back unmodified
pub async fn chat_handler(Extension(state): Extension<ProxyState>, body: String) -> Response {
    let Some(backend) = state.config.chat_backend_url.as_deref() else {
        return (StatusCode::SERVICE_UNAVAILABLE, CHAT_UNAVAILABLE).into_response();
    };

    match serde_json::from_str::<ChatRequest>(&body) {
        Ok(request) if !request.consulta.trim().is_empty() => {}
        _ => return (StatusCode::BAD_REQUEST, EMPTY_QUERY).into_response(),
    }

    let url = format!("{}/api/chat", backend);
    logging::log_proxy_request("/api/chat", &url);

    // Only the connect timeout applies; replies stream for as long as the backend writes
    let response = state
        .client
        .post(&url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => return bad_gateway("/api/chat", e),
    };

    let status = StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/plain; charset=utf-8")
        .to_string();

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from_stream(response.bytes_stream()))
        .unwrap_or_else(|e| bad_gateway("/api/chat", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_only_known_non_empty_params_are_forwarded() {
        let params = upstream_search_params(&query(&[
            ("page", "2"),
            ("pageSize", "50"),
            ("descripcion", "agricultura"),
            ("fechaDesde", ""),
            ("tipoAdministracion", "C"),
            ("inyectado", "x"),
        ]));

        assert_eq!(
            params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("pageSize".to_string(), "50".to_string()),
                ("descripcion".to_string(), "agricultura".to_string()),
                ("descripcionTipoBusqueda".to_string(), "1".to_string()),
                ("tipoAdministracion".to_string(), "C".to_string()),
            ]
        );
    }

    #[test]
    fn test_explicit_match_mode_is_kept() {
        let params = upstream_search_params(&query(&[("descripcionTipoBusqueda", "0")]));
        assert_eq!(params, vec![("descripcionTipoBusqueda".to_string(), "0".to_string())]);
    }
}
