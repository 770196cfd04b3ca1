//! Wire types for the generated startup plan.
//!
//! These map directly to the JSON object the model is instructed to emit
//! (camelCase field names) and are deserialized via `serde` once the
//! response has passed the structural checks in [`super::validate`].

use serde::{Deserialize, Serialize};

/// The canonical output artifact of the generation pipeline.
///
/// Constructed once per successful generation and immutable thereafter;
/// the semantic invariants (non-empty lists, roadmap day ordering, score
/// range) are enforced by [`super::validate::validate`], never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupPlan {
    /// Working name for the startup.
    pub name: String,
    /// One- or two-sentence pitch.
    pub elevator_pitch: String,
    /// The problem being solved.
    pub problem: String,
    /// Who the product is for.
    pub target_audience: String,
    /// A single concrete early-adopter persona.
    pub persona: Persona,
    /// MVP feature split.
    pub mvp_features: MvpFeatures,
    /// Ordered slides/sections of a pitch.
    pub pitch_outline: Vec<String>,
    /// Day-by-day execution roadmap, days strictly increasing from 1.
    pub roadmap: Vec<DayPlan>,
    /// Concrete steps to validate demand.
    pub validation_checklist: Vec<String>,
    /// How to acquire the first users.
    pub acquisition_strategy: String,
    /// Recommended tools. May be empty.
    pub tool_stack: Vec<Tool>,
    /// Model-estimated readiness score, 0-100 inclusive.
    pub readiness_score: i64,
}

/// A single early-adopter persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub role: String,
    pub behavior: String,
    pub location: String,
    pub primary_pain_point: String,
}

/// MVP features split into must-have and nice-to-have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpFeatures {
    /// At least one entry.
    pub must_have: Vec<String>,
    /// May be empty.
    pub nice_to_have: Vec<String>,
}

/// One entry in the execution roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// 1-based day number. Strictly increasing across the roadmap.
    pub day: i64,
    pub task: String,
    pub goal: String,
}

/// A recommended tool with the reason it was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub category: String,
    pub reason: String,
}
