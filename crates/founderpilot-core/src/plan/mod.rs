//! The plan contract: wire types, prompt construction, response validation.

pub mod prompt;
pub mod types;
pub mod validate;

pub use prompt::{build_request, build_retry_request, InvalidInputError};
pub use types::{DayPlan, MvpFeatures, Persona, StartupPlan, Tool};
pub use validate::{validate, FieldIssue, ValidationFailure};
