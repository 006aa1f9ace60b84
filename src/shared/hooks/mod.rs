// Custom Dioxus hooks
pub mod use_chat;
pub mod use_detail;
pub mod use_portal_api;
pub mod use_search;

pub use use_chat::{use_chat, ChatState};
pub use use_detail::{use_detail, DetailState};
pub use use_portal_api::{use_portal_api, PortalClient};
pub use use_search::{use_search, SearchState};
