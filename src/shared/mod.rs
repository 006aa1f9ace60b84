pub mod errors;
pub mod logging;
pub mod services;
pub mod storage;

// Dioxus hooks (both client and server in fullstack)
pub mod hooks;
