//! The `ModelClient` trait -- the capability boundary to the generative model.
//!
//! The orchestrator only ever sees this trait, so it can be driven by
//! deterministic fakes in tests. The trait is intentionally object-safe so
//! it can be stored as `Box<dyn ModelClient>`.

use async_trait::async_trait;
use thiserror::Error;

/// A fully-built request for one model invocation.
///
/// The prompt carries everything the model needs: the user's idea, the
/// output-schema description, and (on retries) the corrective feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub prompt: String,
}

/// The raw text of a model response, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub text: String,
}

/// Transport-level failures, independent of response validation.
///
/// Each of these is terminal for the attempt that produced it and counts
/// toward the orchestrator's retry budget.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The model binary was not found on `$PATH`.
    #[error("model binary {binary:?} not found on PATH")]
    BinaryNotFound { binary: String },

    /// The model process could not be spawned or awaited.
    #[error("failed to run model process: {0}")]
    Process(#[from] std::io::Error),

    /// The model call exceeded the configured wall-time limit.
    #[error("model call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The model process exited unsuccessfully.
    #[error("model process exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    /// The model process exited cleanly but wrote nothing to stdout.
    #[error("model process produced no output")]
    EmptyResponse,
}

/// Adapter interface for invoking a generative model.
///
/// One operation: hand over a request, suspend until the full response (or
/// a transport error) arrives. Implementations must not retry internally --
/// retry policy belongs to the orchestrator.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Human-readable name for this client (e.g. "gemini-cli").
    fn name(&self) -> &str;

    /// Invoke the model once and return its raw response text.
    async fn invoke(&self, request: &ModelRequest) -> Result<RawResponse, TransportError>;
}

// Compile-time assertion: ModelClient must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn ModelClient) {}
};
