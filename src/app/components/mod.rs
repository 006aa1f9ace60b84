pub mod chat_panel;
pub mod common;
pub mod detail_modal;
pub mod pagination;
pub mod results_list;
pub mod search_form;

pub use chat_panel::ChatPanel;
pub use common::{EmptyState, ErrorMessage, LoadingText};
pub use detail_modal::DetailModal;
pub use pagination::Pagination;
pub use results_list::{ResultItem, ResultsSection};
pub use search_form::SearchFormPanel;
