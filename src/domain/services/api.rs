//! Remote operations the portal depends on
//!
//! Implemented by the browser fetch client (WASM) and the reqwest client (native);
//! tests substitute an in-memory fake.

use async_trait::async_trait;
use futures::stream::LocalBoxStream;
use serde_json::Value;

use crate::domain::models::{ChatRequest, SearchResultPage};
use crate::shared::errors::Result;

/// Finite, non-restartable sequence of decoded text chunks
pub type ChatStream = LocalBoxStream<'static, Result<String>>;

#[async_trait(?Send)]
pub trait PortalApi {
    /// `GET /api/buscar?<params>`
    async fn search(&self, params: &[(String, String)]) -> Result<SearchResultPage>;

    /// `GET /api/convocatoria/<id>`, raw payload (shape normalized by the caller)
    async fn fetch_detail(&self, id: &str) -> Result<Value>;

    /// `POST /api/chat`; resolves once response headers arrive
    async fn open_chat(&self, request: &ChatRequest) -> Result<ChatStream>;
}
