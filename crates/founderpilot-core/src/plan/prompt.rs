//! Prompt construction: turns an idea into a model request that pins down
//! the exact output contract, plus the corrective follow-up used on retries.
//!
//! Pure functions of their inputs; no I/O.

use thiserror::Error;

use crate::model::ModelRequest;

use super::validate::ValidationFailure;

/// The caller supplied unusable input. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("idea must not be blank")]
pub struct InvalidInputError;

/// JSON schema reference included in every prompt.
///
/// Field names and constraints here must match [`super::validate`] exactly;
/// the corrective retry loop depends on the model being told the same rules
/// the validator enforces.
const SCHEMA_REFERENCE: &str = r#"## Output Schema

Respond with ONE JSON object and nothing else. No prose before or after it.

```json
{
  "name": "string",                  // REQUIRED, non-blank. Working name for the startup.
  "elevatorPitch": "string",         // REQUIRED, non-blank. One or two sentences.
  "problem": "string",               // REQUIRED, non-blank.
  "targetAudience": "string",        // REQUIRED, non-blank.
  "persona": {                       // REQUIRED. One concrete early adopter.
    "role": "string",                // all four fields REQUIRED, non-blank
    "behavior": "string",
    "location": "string",
    "primaryPainPoint": "string"
  },
  "mvpFeatures": {
    "mustHave": ["string"],          // REQUIRED, at least one non-blank entry
    "niceToHave": ["string"]         // REQUIRED, may be empty
  },
  "pitchOutline": ["string"],        // REQUIRED, ordered, at least one entry
  "roadmap": [                       // REQUIRED, at least one entry
    {"day": 1, "task": "string", "goal": "string"}
    // day is an integer, starts at 1, strictly increasing, no duplicates
  ],
  "validationChecklist": ["string"], // REQUIRED, at least one entry
  "acquisitionStrategy": "string",   // REQUIRED, non-blank
  "toolStack": [                     // REQUIRED, may be empty
    {"name": "string", "category": "string", "reason": "string"}
  ],
  "readinessScore": 0                // REQUIRED, integer between 0 and 100 inclusive
}
```
"#;

/// Planning guidelines included in every prompt.
const PLANNING_GUIDELINES: &str = r#"## Planning Guidelines

1. **Be concrete.** Every roadmap task must be something one person can do
   that day. "Talk to 10 potential users" beats "do market research".
2. **Assume a student founder.** Little money, little time, no network.
   The plan must work from a hostel room with a laptop and a phone.
3. **Front-load validation.** The first week of the roadmap is for talking
   to users and pre-selling, not for building.
4. **Keep mustHave brutal.** Three features or fewer. Everything else goes
   in niceToHave.
5. **Score honestly.** readinessScore reflects how validated and executable
   this idea is today, not how exciting it sounds.
"#;

/// Build the first-attempt request for an idea.
///
/// Fails with [`InvalidInputError`] when the idea is blank after trimming;
/// this is checked before any external call is attempted. The idea text is
/// embedded verbatim.
pub fn build_request(idea: &str) -> Result<ModelRequest, InvalidInputError> {
    let idea = idea.trim();
    if idea.is_empty() {
        return Err(InvalidInputError);
    }

    let mut prompt = String::with_capacity(4096);

    prompt.push_str("# Startup Execution Planner\n\n");
    prompt.push_str(
        "You are an execution co-founder for first-time student entrepreneurs. \
         Turn the idea below into a complete, structured execution plan.\n\n",
    );
    prompt.push_str("## Idea\n\n");
    prompt.push_str(idea);
    prompt.push_str("\n\n");
    prompt.push_str(SCHEMA_REFERENCE);
    prompt.push('\n');
    prompt.push_str(PLANNING_GUIDELINES);

    Ok(ModelRequest { prompt })
}

/// Build a corrective follow-up request after a rejected response.
///
/// Carries the full original request plus a feedback section describing
/// exactly which fields or constraints failed, so the model can fix its
/// output rather than guess.
pub fn build_retry_request(
    idea: &str,
    failure: &ValidationFailure,
) -> Result<ModelRequest, InvalidInputError> {
    let base = build_request(idea)?;

    let mut prompt = base.prompt;
    prompt.push('\n');
    prompt.push_str("## Previous Attempt Feedback\n\n");
    prompt.push_str(
        "Your previous response was rejected by the schema validator. \
         Produce the complete JSON object again, corrected.\n\n",
    );
    prompt.push_str(&failure.feedback());

    Ok(ModelRequest { prompt })
}
