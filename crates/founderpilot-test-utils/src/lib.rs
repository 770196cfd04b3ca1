//! Shared test utilities for founderpilot integration tests.
//!
//! Provides [`ScriptedClient`], a deterministic [`ModelClient`] fake that
//! replays a fixed sequence of responses and records every prompt it was
//! given, plus a canned valid plan payload.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use founderpilot_core::model::{ModelClient, ModelRequest, RawResponse, TransportError};

/// One scripted outcome for a model invocation.
#[derive(Debug)]
pub enum ScriptedResponse {
    /// Return this text as the response body.
    Text(String),
    /// Fail the attempt with a transport error.
    Transport(TransportError),
}

/// A [`ModelClient`] that replays a fixed script.
///
/// Invocations pop the front of the script; a call past the end of the
/// script fails with a transport error rather than panicking, so exhaustion
/// shows up as a test assertion failure with context.
pub struct ScriptedClient {
    script: Mutex<VecDeque<ScriptedResponse>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<ScriptedResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Client that answers every call with the same text.
    pub fn always(text: impl Into<String>) -> Self {
        let text = text.into();
        // A generous repeat count; orchestrator budgets are single digits.
        Self::new(
            std::iter::repeat_with(|| ScriptedResponse::Text(text.clone()))
                .take(32)
                .collect(),
        )
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, request: &ModelRequest) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.prompt.clone());

        let next = self
            .script
            .lock()
            .expect("script poisoned")
            .pop_front();

        match next {
            Some(ScriptedResponse::Text(text)) => Ok(RawResponse { text }),
            Some(ScriptedResponse::Transport(err)) => Err(err),
            None => Err(TransportError::Failed {
                code: None,
                stderr: "scripted client exhausted".to_string(),
            }),
        }
    }
}

/// A complete, valid `StartupPlan` payload as the model would emit it.
pub fn valid_plan_json() -> String {
    serde_json::json!({
        "name": "EcoTiffin",
        "elevatorPitch": "Zero-waste tiffin subscriptions for hostel students.",
        "problem": "Hostel mess food is inflexible and delivery packaging piles up.",
        "targetAudience": "Hostel students in tier-1 college towns",
        "persona": {
            "role": "Second-year engineering student",
            "behavior": "Orders delivery four times a week",
            "location": "Pune",
            "primaryPainPoint": "Guilt over single-use packaging and inconsistent meals"
        },
        "mvpFeatures": {
            "mustHave": ["Weekly subscription ordering", "Steel tiffin swap logistics"],
            "niceToHave": ["Calorie tracking"]
        },
        "pitchOutline": ["Problem", "Solution", "Market", "Ask"],
        "roadmap": [
            {"day": 1, "task": "Interview 10 hostel students", "goal": "Confirm the pain"},
            {"day": 2, "task": "Price out tiffin suppliers", "goal": "Unit economics draft"},
            {"day": 3, "task": "Post a signup form in two hostel groups", "goal": "20 leads"}
        ],
        "validationChecklist": ["Pre-sell 20 weekly subscriptions"],
        "acquisitionStrategy": "Hostel WhatsApp groups and mess notice boards",
        "toolStack": [
            {"name": "Razorpay", "category": "Payments", "reason": "UPI-first checkout"}
        ],
        "readinessScore": 72
    })
    .to_string()
}

/// A payload that parses as JSON but is missing required fields.
pub fn missing_fields_json() -> String {
    serde_json::json!({
        "name": "EcoTiffin",
        "problem": "Hostel food"
    })
    .to_string()
}

/// A payload that violates the roadmap day ordering constraint.
pub fn duplicate_day_json() -> String {
    let mut value: serde_json::Value =
        serde_json::from_str(&valid_plan_json()).expect("fixture is valid JSON");
    value["roadmap"][1]["day"] = serde_json::json!(1);
    value.to_string()
}
