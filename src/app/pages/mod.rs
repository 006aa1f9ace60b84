pub mod portal;

pub use portal::{App, Route};
