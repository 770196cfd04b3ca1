//! Gemini CLI adapter.
//!
//! Spawns the `gemini` CLI as a one-shot subprocess with the prompt as a
//! positional argument and captures stdout as the response text. The call
//! is bounded by a wall-time limit; hitting it kills the process.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::trait_def::{ModelClient, ModelRequest, RawResponse, TransportError};

const DEFAULT_BINARY: &str = "gemini";
const DEFAULT_MODEL: &str = "auto";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const STDERR_CAP_BYTES: usize = 8 * 1024;

/// [`ModelClient`] implementation backed by the Gemini CLI.
#[derive(Debug, Clone)]
pub struct GeminiCliClient {
    /// Path to the `gemini` binary. Defaults to `"gemini"` (found via `$PATH`).
    binary: String,
    /// Model name passed as `-m`. `"auto"` omits the flag and lets the CLI route.
    model: String,
    /// Wall-time limit for one invocation.
    timeout: Duration,
}

impl Default for GeminiCliClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiCliClient {
    /// Create a client with the default binary, auto model routing, and a
    /// 120s timeout.
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a custom binary path instead of `gemini` on `$PATH`.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Pin a specific model instead of auto routing.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the wall-time limit for one invocation.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ModelClient for GeminiCliClient {
    fn name(&self) -> &str {
        "gemini-cli"
    }

    async fn invoke(&self, request: &ModelRequest) -> Result<RawResponse, TransportError> {
        let mut cmd = Command::new(&self.binary);
        cmd.kill_on_drop(true)
            .env("CI", "true")
            .env("TERM", "dumb")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if self.model != "auto" && !self.model.is_empty() {
            cmd.arg("-m").arg(&self.model);
        }
        cmd.arg(&request.prompt);

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                TransportError::BinaryNotFound {
                    binary: self.binary.clone(),
                }
            } else {
                TransportError::Process(e)
            }
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_elapsed| TransportError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(TransportError::Process)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransportError::Failed {
                code: output.status.code(),
                stderr: cap_stderr(&stderr),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(TransportError::EmptyResponse);
        }

        Ok(RawResponse { text })
    }
}

/// Cap captured stderr at [`STDERR_CAP_BYTES`], appending "..." if truncated.
fn cap_stderr(s: &str) -> String {
    if s.len() <= STDERR_CAP_BYTES {
        return s.to_owned();
    }
    let mut end = STDERR_CAP_BYTES;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut capped = s[..end].to_owned();
    capped.push_str("...");
    capped
}
