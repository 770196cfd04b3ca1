//! Core library for founderpilot: turns a one-line startup idea into a
//! validated [`plan::StartupPlan`] by driving a generative model under a
//! strict output contract, and grades founder readiness through a fixed
//! question sequence.
//!
//! The two pipelines are independent:
//!
//! - idea -> [`plan::build_request`] -> [`generate::generate`] (validates
//!   with [`plan::validate`], retries with corrective feedback) -> plan
//! - answers -> [`readiness::ReadinessQuestionEngine`] ->
//!   [`readiness::ReadinessScorer`] -> [`readiness::ReadinessResult`]

pub mod generate;
pub mod model;
pub mod plan;
pub mod readiness;
