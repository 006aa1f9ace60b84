// Business logic services
// Framework-agnostic, 100% testable

pub mod api;
pub mod chat;
pub mod detail;
pub mod fields;
pub mod pagination;
pub mod render;
pub mod search_session;
pub mod text_decoder;
pub mod thread_id;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ChatStream, PortalApi};
pub use chat::{ChatController, ChatEvent, ChatPhase, ChatTranscript, SubmitRejected, stream_reply};
pub use detail::{DetailController, DetailView, fetch_detail, normalize_detail};
pub use pagination::{PageControl, PageWindow, should_paginate};
pub use search_session::{SearchController, SearchRequest, SearchSession, SearchView};
pub use text_decoder::{Utf8ChunkDecoder, decode_text_chunks};
pub use thread_id::{KeyValueStore, load_or_create_session};
