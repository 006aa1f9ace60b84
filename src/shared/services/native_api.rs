//! `PortalApi` over reqwest, for native builds and integration tests

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::domain::models::{ChatRequest, SearchResultPage};
use crate::domain::services::api::{ChatStream, PortalApi};
use crate::domain::services::text_decoder::decode_text_chunks;
use crate::shared::errors::{ApiError, Result};
use crate::shared::services::error_message;

#[derive(Debug, Clone)]
pub struct NativePortalApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl Default for NativePortalApi {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl NativePortalApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn check(response: reqwest::Response, with_body: bool) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let message = if with_body {
            let body = response.text().await.unwrap_or_default();
            error_message(&body, &reason)
        } else {
            reason
        };
        Err(ApiError::http(status.as_u16(), message))
    }

    async fn get_json(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(network)?;
        let response = Self::check(response, false).await?;
        let text = response.text().await.map_err(network)?;
        Ok(serde_json::from_str(&text)?)
    }
}

fn network(e: reqwest::Error) -> ApiError {
    ApiError::NetworkFailure(e.to_string())
}

#[async_trait(?Send)]
impl PortalApi for NativePortalApi {
    async fn search(&self, params: &[(String, String)]) -> Result<SearchResultPage> {
        let request = self.client.get(self.config.search_url()).query(params);
        let payload = self.get_json(request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    async fn fetch_detail(&self, id: &str) -> Result<Value> {
        self.get_json(self.client.get(self.config.detail_url(id))).await
    }

    async fn open_chat(&self, request: &ChatRequest) -> Result<ChatStream> {
        let response = self
            .client
            .post(self.config.chat_url())
            .json(request)
            .send()
            .await
            .map_err(network)?;
        let response = Self::check(response, true).await?;

        let bytes = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(network))
            .boxed_local();
        Ok(decode_text_chunks(bytes))
    }
}
