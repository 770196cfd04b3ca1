//! Generation orchestrator: drives the model call, validates each response,
//! and retries with corrective feedback up to a fixed attempt budget.
//!
//! Each [`generate`] invocation owns its attempt counter and failure
//! history; nothing is cached or shared across calls.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::model::{ModelClient, TransportError};
use crate::plan::prompt::{self, InvalidInputError};
use crate::plan::validate::{self, ValidationFailure};
use crate::plan::StartupPlan;

/// Default total attempt budget (first attempt plus retries).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Policy knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Total attempts before giving up. Values below 1 are treated as 1.
    pub max_attempts: u32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// What the final failed attempt died of.
#[derive(Debug, Error)]
pub enum AttemptFailure {
    #[error("response failed validation: {0}")]
    Validation(ValidationFailure),
    #[error("transport failed: {0}")]
    Transport(TransportError),
}

/// Terminal errors from [`generate`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The idea was blank. Surfaced before any external call.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// Every attempt in the budget failed; carries the last failure so the
    /// caller can explain what went wrong without re-deriving it.
    #[error("generation exhausted after {attempts} attempt(s): {last_failure}")]
    Exhausted {
        attempts: u32,
        last_failure: AttemptFailure,
    },

    /// The caller cancelled between attempts. Any unvalidated response was
    /// discarded.
    #[error("generation cancelled")]
    Cancelled,
}

/// Generate a validated [`StartupPlan`] from a one-line idea.
///
/// Algorithm:
/// 1. Build the first request (blank idea fails immediately).
/// 2. Invoke the model.
/// 3. Validate the response; a valid plan returns at once.
/// 4. On a validation failure, build a corrective request embedding the
///    failure and go again. On a transport failure, re-issue the previous
///    request (there is no validator feedback to add).
/// 5. After `config.max_attempts` total attempts, fail with
///    [`GenerateError::Exhausted`].
///
/// Cancellation is observed at attempt boundaries only, so an accepted
/// response is never discarded mid-validation.
pub async fn generate(
    client: &dyn ModelClient,
    idea: &str,
    config: &GenerateConfig,
    cancel: &CancellationToken,
) -> Result<StartupPlan, GenerateError> {
    let request_id = Uuid::new_v4();
    let max_attempts = config.max_attempts.max(1);

    let mut request = prompt::build_request(idea)?;
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        if cancel.is_cancelled() {
            tracing::info!(request_id = %request_id, attempt, "generation cancelled by caller");
            return Err(GenerateError::Cancelled);
        }

        tracing::info!(
            request_id = %request_id,
            attempt,
            max_attempts,
            model = client.name(),
            "invoking model"
        );

        let failure = match client.invoke(&request).await {
            Ok(response) => match validate::validate(&response.text) {
                Ok(plan) => {
                    tracing::info!(
                        request_id = %request_id,
                        attempt,
                        plan_name = %plan.name,
                        "plan validated"
                    );
                    return Ok(plan);
                }
                Err(failure) => {
                    tracing::warn!(
                        request_id = %request_id,
                        attempt,
                        failure = %failure,
                        "response rejected by validator"
                    );
                    request = prompt::build_retry_request(idea, &failure)?;
                    AttemptFailure::Validation(failure)
                }
            },
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    attempt,
                    error = %e,
                    "transport failure"
                );
                AttemptFailure::Transport(e)
            }
        };

        if attempt >= max_attempts {
            tracing::warn!(
                request_id = %request_id,
                attempts = attempt,
                "generation exhausted"
            );
            return Err(GenerateError::Exhausted {
                attempts: attempt,
                last_failure: failure,
            });
        }
    }
}
