//! `PortalApi` over the browser's fetch
//!
//! JSON endpoints go through gloo-net; the chat endpoint uses raw `fetch` so
//! the response body can be read incrementally from its `ReadableStream`.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use gloo_net::http::Request as GlooRequest;
use js_sys::{Reflect, Uint8Array};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{ReadableStreamDefaultReader, Request, RequestInit, RequestMode, Response};

use crate::config::ClientConfig;
use crate::domain::models::{ChatRequest, SearchResultPage, encode_query_string};
use crate::domain::services::api::{ChatStream, PortalApi};
use crate::domain::services::text_decoder::decode_text_chunks;
use crate::shared::errors::{ApiError, Result};
use crate::shared::services::error_message;

#[derive(Debug, Clone, Default)]
pub struct BrowserPortalApi {
    config: ClientConfig,
}

impl BrowserPortalApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = GlooRequest::get(url)
            .send()
            .await
            .map_err(|e| ApiError::NetworkFailure(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::http(response.status(), response.status_text()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkFailure(e.to_string()))?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::NetworkFailure(format!("{:?}", value))
}

#[async_trait(?Send)]
impl PortalApi for BrowserPortalApi {
    async fn search(&self, params: &[(String, String)]) -> Result<SearchResultPage> {
        let url = format!("{}?{}", self.config.search_url(), encode_query_string(params));
        let payload = self.get_json(&url).await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn fetch_detail(&self, id: &str) -> Result<Value> {
        self.get_json(&self.config.detail_url(id)).await
    }

    async fn open_chat(&self, request: &ChatRequest) -> Result<ChatStream> {
        let body = serde_json::to_string(request)?;
        let window = web_sys::window().ok_or_else(|| ApiError::NetworkFailure("no window".into()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_body(&JsValue::from_str(&body));

        let fetch_request =
            Request::new_with_str_and_init(&self.config.chat_url(), &opts).map_err(js_error)?;
        fetch_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;

        if !response.ok() {
            let text = match response.text() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            return Err(ApiError::http(
                response.status(),
                error_message(&text, &response.status_text()),
            ));
        }

        let body = response
            .body()
            .ok_or_else(|| ApiError::NetworkFailure("response without body".into()))?;
        let reader: ReadableStreamDefaultReader = body.get_reader().dyn_into().map_err(js_error)?;

        Ok(decode_text_chunks(read_chunks(reader)))
    }
}

/// Byte chunks from a stream reader until `done`
fn read_chunks(
    reader: ReadableStreamDefaultReader,
) -> futures::stream::LocalBoxStream<'static, Result<Vec<u8>>> {
    stream::unfold(Some(reader), |reader| async move {
        let reader = reader?;
        let result = match JsFuture::from(reader.read()).await {
            Ok(result) => result,
            Err(e) => return Some((Err(js_error(e)), None)),
        };

        let done = Reflect::get(&result, &JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            return None;
        }

        let bytes = Reflect::get(&result, &JsValue::from_str("value"))
            .ok()
            .and_then(|v| v.dyn_into::<Uint8Array>().ok())
            .map(|chunk| chunk.to_vec())
            .unwrap_or_default();
        Some((Ok(bytes), Some(reader)))
    })
    .boxed_local()
}
