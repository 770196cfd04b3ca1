//! The generative-model boundary: request/response types, the [`ModelClient`]
//! trait, and the Gemini CLI adapter.

pub mod gemini;
pub mod trait_def;

pub use gemini::GeminiCliClient;
pub use trait_def::{ModelClient, ModelRequest, RawResponse, TransportError};
