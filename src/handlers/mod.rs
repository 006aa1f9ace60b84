/// Pass-through routes to the BDNS API and the chat backend
pub mod proxy;

pub use proxy::{ProxyState, chat_handler, detail_handler, search_handler, upstream_search_params};
