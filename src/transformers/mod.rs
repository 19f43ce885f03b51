//! Built-in transformers: text, JSON and identity

pub mod colors;
pub mod identity;
pub mod json;
pub mod text;

pub use colors::{ColorKey, ColorMap, Paint};
pub use identity::IdentityTransformer;
pub use json::JsonTransformer;
pub use text::{TextTransformer, DEFAULT_MAX_DEPTH};
