//! Readiness question library, embedded in the binary at compile time.
//!
//! The library is fixed reference data: loaded once, never mutated.

use serde::Deserialize;

/// A single readiness question with its scoring policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadinessQuestion {
    /// Unique question id.
    pub id: u32,
    /// Stable key used to derive the survey profile (e.g. `can_build`).
    pub key: String,
    /// The question as shown to the user.
    pub question: String,
    /// Short framing shown alongside the question.
    pub context: String,
    /// Ordered answer choices. At least two.
    pub options: Vec<String>,
    /// Point contribution per option, index-aligned with `options`.
    pub weights: Vec<u32>,
    /// Answers scoring strictly below this flag the blind spot.
    pub safe: u32,
    /// Weakness label attached when the answer falls below `safe`.
    pub blindspot: String,
}

/// Container for deserializing the embedded TOML file.
#[derive(Debug, Deserialize)]
struct QuestionLibrary {
    questions: Vec<ReadinessQuestion>,
}

/// The embedded question library TOML.
static QUESTIONS_TOML: &str = include_str!("questions.toml");

/// Load the fixed, ordered question set.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. This is a compile-time
/// invariant -- if the binary was built, the TOML is valid.
pub fn load_questions() -> Vec<ReadinessQuestion> {
    let lib: QuestionLibrary =
        toml::from_str(QUESTIONS_TOML).expect("embedded questions.toml is invalid");
    lib.questions
}
