//! In-memory `PortalApi` for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;

use crate::domain::models::{ChatRequest, SearchResultPage};
use crate::domain::services::api::{ChatStream, PortalApi};
use crate::shared::errors::{ApiError, Result};

enum ChatReply {
    Fail(ApiError),
    Stream(Vec<Result<String>>),
}

/// Scripted responses, consumed in order; every call is recorded
#[derive(Default)]
pub struct FakeApi {
    search_results: RefCell<VecDeque<Result<SearchResultPage>>>,
    detail_results: RefCell<VecDeque<Result<Value>>>,
    chat_replies: RefCell<VecDeque<ChatReply>>,
    search_calls: RefCell<Vec<Vec<(String, String)>>>,
    detail_calls: RefCell<Vec<String>>,
    chat_calls: RefCell<Vec<ChatRequest>>,
}

impl FakeApi {
    pub fn with_search(self, result: Result<SearchResultPage>) -> Self {
        self.search_results.borrow_mut().push_back(result);
        self
    }

    pub fn with_detail(self, result: Result<Value>) -> Self {
        self.detail_results.borrow_mut().push_back(result);
        self
    }

    pub fn with_chat_chunks(self, chunks: &[&str]) -> Self {
        let items = chunks.iter().map(|c| Ok(c.to_string())).collect();
        self.chat_replies.borrow_mut().push_back(ChatReply::Stream(items));
        self
    }

    pub fn with_chat_items(self, items: Vec<Result<String>>) -> Self {
        self.chat_replies.borrow_mut().push_back(ChatReply::Stream(items));
        self
    }

    pub fn with_chat_error(self, error: ApiError) -> Self {
        self.chat_replies.borrow_mut().push_back(ChatReply::Fail(error));
        self
    }

    pub fn search_calls(&self) -> Vec<Vec<(String, String)>> {
        self.search_calls.borrow().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.borrow().clone()
    }

    pub fn chat_calls(&self) -> Vec<ChatRequest> {
        self.chat_calls.borrow().clone()
    }
}

fn unscripted() -> ApiError {
    ApiError::NetworkFailure("no scripted response".to_string())
}

#[async_trait(?Send)]
impl PortalApi for FakeApi {
    async fn search(&self, params: &[(String, String)]) -> Result<SearchResultPage> {
        self.search_calls.borrow_mut().push(params.to_vec());
        self.search_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn fetch_detail(&self, id: &str) -> Result<Value> {
        self.detail_calls.borrow_mut().push(id.to_string());
        self.detail_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    async fn open_chat(&self, request: &ChatRequest) -> Result<ChatStream> {
        self.chat_calls.borrow_mut().push(request.clone());
        let reply = self.chat_replies.borrow_mut().pop_front();
        match reply {
            Some(ChatReply::Stream(items)) => Ok(stream::iter(items).boxed_local()),
            Some(ChatReply::Fail(e)) => Err(e),
            None => Err(unscripted()),
        }
    }
}
