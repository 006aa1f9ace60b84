// Domain models (portal entities)
// Pure Rust, no framework dependencies

pub mod convocatoria;
pub mod search;
pub mod chat;

pub use convocatoria::{AdminType, Convocatoria, ConvocatoriaDetail, ConvocatoriaSummary};
pub use search::{
    DescriptionMatch, SearchForm, SearchQuery, SearchResultPage, encode_query_string,
};
pub use chat::{ChatMessage, ChatRequest, ChatRole, ChatSession};
