//! Structured logging for the portal
//!
//! Provides consistent, contextual logging across search, detail and chat flows.
//! Every event carries an `operation` field so browser and server logs can be filtered the same way.

/// Operations that emit structured events
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    Search,
    Pagination,
    DetailFetch,
    ChatStream,
    ThreadId,
    Proxy,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::Search => "search",
            LogOperation::Pagination => "pagination",
            LogOperation::DetailFetch => "detail_fetch",
            LogOperation::ChatStream => "chat_stream",
            LogOperation::ThreadId => "thread_id",
            LogOperation::Proxy => "proxy",
        }
    }
}

/// Log a search request leaving the client
pub fn log_search_start(generation: u64, page: u32, field_count: usize) {
    tracing::info!(
        operation = LogOperation::Search.as_str(),
        generation = generation,
        page = page,
        fields = field_count,
        "Starting search"
    );
}

/// Log a search response applied to the view
pub fn log_search_result(generation: u64, item_count: usize, total_items: u64, total_pages: u32) {
    tracing::info!(
        operation = LogOperation::Search.as_str(),
        generation = generation,
        items = item_count,
        total_items = total_items,
        total_pages = total_pages,
        "Search completed"
    );
}

/// Log a response that arrived after a newer search or a reset
pub fn log_search_discarded(generation: u64, latest: u64) {
    tracing::debug!(
        operation = LogOperation::Search.as_str(),
        generation = generation,
        latest_generation = latest,
        "Discarded superseded search response"
    );
}

pub fn log_search_error(generation: u64, error: &str) {
    tracing::error!(
        operation = LogOperation::Search.as_str(),
        generation = generation,
        error = error,
        "Search failed"
    );
}

/// Log the page window chosen for the pagination widget
pub fn log_page_window(total_pages: u32, current_page: u32, start: u32, end: u32) {
    tracing::trace!(
        operation = LogOperation::Pagination.as_str(),
        total_pages = total_pages,
        current_page = current_page,
        window_start = start,
        window_end = end,
        "Computed page window"
    );
}

pub fn log_detail_start(id: &str) {
    tracing::debug!(
        operation = LogOperation::DetailFetch.as_str(),
        convocatoria_id = id,
        "Fetching convocatoria detail"
    );
}

pub fn log_detail_not_found(id: &str) {
    tracing::warn!(
        operation = LogOperation::DetailFetch.as_str(),
        convocatoria_id = id,
        "Detail payload empty or unexpected"
    );
}

pub fn log_detail_error(id: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::DetailFetch.as_str(),
        convocatoria_id = id,
        error = error,
        "Failed to fetch convocatoria detail"
    );
}

/// Log a chat turn leaving the client
pub fn log_chat_submit(thread_id: &str, query_len: usize) {
    tracing::info!(
        operation = LogOperation::ChatStream.as_str(),
        thread_id = thread_id,
        query_len = query_len,
        "Sending chat query"
    );
}

pub fn log_chat_chunk(chunk_len: usize, accumulated_len: usize) {
    tracing::trace!(
        operation = LogOperation::ChatStream.as_str(),
        chunk_len = chunk_len,
        accumulated_len = accumulated_len,
        "Received chat chunk"
    );
}

pub fn log_chat_finished(accumulated_len: usize) {
    tracing::info!(
        operation = LogOperation::ChatStream.as_str(),
        accumulated_len = accumulated_len,
        "Chat stream completed"
    );
}

pub fn log_chat_error(error: &str, streaming: bool) {
    tracing::error!(
        operation = LogOperation::ChatStream.as_str(),
        error = error,
        mid_stream = streaming,
        "Chat request failed"
    );
}

/// Log creation of a new conversation identifier
pub fn log_thread_id_created(thread_id: &str, fallback: bool) {
    if fallback {
        tracing::warn!(
            operation = LogOperation::ThreadId.as_str(),
            thread_id = thread_id,
            "Strong random source unavailable, using fallback thread id"
        );
    } else {
        tracing::info!(
            operation = LogOperation::ThreadId.as_str(),
            thread_id = thread_id,
            "Created chat thread id"
        );
    }
}

pub fn log_thread_id_persist_error(error: &str) {
    tracing::warn!(
        operation = LogOperation::ThreadId.as_str(),
        error = error,
        "Could not persist chat thread id, it will last for this page only"
    );
}

/// Log an upstream call made by the hosting proxy
pub fn log_proxy_request(route: &str, upstream: &str) {
    tracing::debug!(
        operation = LogOperation::Proxy.as_str(),
        route = route,
        upstream = upstream,
        "Forwarding request upstream"
    );
}

pub fn log_proxy_error(route: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::Proxy.as_str(),
        route = route,
        error = error,
        "Upstream request failed"
    );
}
