//! Founder readiness assessment: question library, sequential engine, scorer.

pub mod engine;
pub mod questions;
pub mod scorer;

pub use engine::{AnswerError, ReadinessQuestionEngine, SurveyAnswerSet, SurveyProfile};
pub use questions::{load_questions, ReadinessQuestion};
pub use scorer::{Grade, GradePolicy, ReadinessResult, ReadinessScorer, ScoreError};
