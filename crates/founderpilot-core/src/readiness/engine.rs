//! Question engine: walks the fixed question sequence strictly in order and
//! accumulates the answer set.
//!
//! Sequential answering (no skipping, no revisiting) is what guarantees the
//! scorer always receives a complete, ordered answer set.

use std::collections::BTreeMap;

use thiserror::Error;

use super::questions::{load_questions, ReadinessQuestion};

/// Ordered map from question id to the chosen option index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyAnswerSet {
    answers: BTreeMap<u32, usize>,
}

impl SurveyAnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer. Callers outside the engine exist only in tests;
    /// the engine is the one place answers are accepted in sequence.
    pub fn insert(&mut self, id: u32, choice: usize) {
        self.answers.insert(id, choice);
    }

    pub fn get(&self, id: u32) -> Option<usize> {
        self.answers.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate answers in ascending question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.answers.iter().map(|(id, choice)| (*id, *choice))
    }

    /// Derive the survey profile from the recorded answers.
    ///
    /// Returns `None` until every profile key has an answer. The booleans
    /// are true when the chosen option scores at or above the question's
    /// safe threshold.
    pub fn profile(&self, questions: &[ReadinessQuestion]) -> Option<SurveyProfile> {
        let lookup = |key: &str| -> Option<(&ReadinessQuestion, usize)> {
            let q = questions.iter().find(|q| q.key == key)?;
            let choice = self.get(q.id)?;
            Some((q, choice))
        };
        let label = |key: &str| -> Option<String> {
            let (q, choice) = lookup(key)?;
            q.options.get(choice).cloned()
        };
        let at_least_safe = |key: &str| -> Option<bool> {
            let (q, choice) = lookup(key)?;
            Some(*q.weights.get(choice)? >= q.safe)
        };

        Some(SurveyProfile {
            hours_per_week: label("hours_per_week")?,
            has_spoken_to_users: at_least_safe("spoken_to_users")?,
            team_size: label("team_size")?,
            can_build: at_least_safe("can_build")?,
            starting_budget: label("starting_budget")?,
        })
    }
}

/// Derived view of a completed answer set, mirroring the survey inputs the
/// rest of the product consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyProfile {
    pub hours_per_week: String,
    pub has_spoken_to_users: bool,
    pub team_size: String,
    pub can_build: bool,
    pub starting_budget: String,
}

/// Why an answer was rejected. The cursor never advances on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("question {id} is not the current question (expected {expected})")]
    OutOfOrder { id: u32, expected: u32 },

    #[error("option {choice} is out of range for question {id} ({available} options)")]
    UnknownOption {
        id: u32,
        choice: usize,
        available: usize,
    },

    #[error("the assessment is already complete")]
    Complete,
}

/// Walks the question sequence in order, one answer at a time.
#[derive(Debug)]
pub struct ReadinessQuestionEngine {
    questions: Vec<ReadinessQuestion>,
    cursor: usize,
    answers: SurveyAnswerSet,
}

impl Default for ReadinessQuestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessQuestionEngine {
    /// Engine over the built-in question library.
    pub fn new() -> Self {
        Self::with_questions(load_questions())
    }

    /// Engine over an explicit question list.
    pub fn with_questions(questions: Vec<ReadinessQuestion>) -> Self {
        Self {
            questions,
            cursor: 0,
            answers: SurveyAnswerSet::new(),
        }
    }

    /// The next unanswered question, or `None` when the sequence is done.
    pub fn current(&self) -> Option<&ReadinessQuestion> {
        self.questions.get(self.cursor)
    }

    /// Accept an answer for the current question and advance the cursor.
    pub fn answer(&mut self, id: u32, choice: usize) -> Result<(), AnswerError> {
        let Some(current) = self.questions.get(self.cursor) else {
            return Err(AnswerError::Complete);
        };

        if id != current.id {
            return Err(AnswerError::OutOfOrder {
                id,
                expected: current.id,
            });
        }

        if choice >= current.options.len() {
            return Err(AnswerError::UnknownOption {
                id,
                choice,
                available: current.options.len(),
            });
        }

        self.answers.insert(id, choice);
        self.cursor += 1;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    /// `(answered, total)` for progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.cursor, self.questions.len())
    }

    pub fn questions(&self) -> &[ReadinessQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &SurveyAnswerSet {
        &self.answers
    }

    /// Consume the engine and hand the accumulated answers to the scorer.
    pub fn into_answers(self) -> SurveyAnswerSet {
        self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_questions() -> Vec<ReadinessQuestion> {
        vec![
            ReadinessQuestion {
                id: 1,
                key: "first".to_string(),
                question: "First?".to_string(),
                context: "ctx".to_string(),
                options: vec!["no".to_string(), "yes".to_string()],
                weights: vec![0, 50],
                safe: 50,
                blindspot: "First thing".to_string(),
            },
            ReadinessQuestion {
                id: 2,
                key: "second".to_string(),
                question: "Second?".to_string(),
                context: "ctx".to_string(),
                options: vec!["no".to_string(), "yes".to_string()],
                weights: vec![0, 50],
                safe: 50,
                blindspot: "Second thing".to_string(),
            },
        ]
    }

    #[test]
    fn walks_questions_in_order() {
        let mut engine = ReadinessQuestionEngine::with_questions(two_questions());
        assert_eq!(engine.current().map(|q| q.id), Some(1));
        assert_eq!(engine.progress(), (0, 2));

        engine.answer(1, 1).expect("valid answer");
        assert_eq!(engine.current().map(|q| q.id), Some(2));
        assert_eq!(engine.progress(), (1, 2));

        engine.answer(2, 0).expect("valid answer");
        assert!(engine.is_complete());
        assert!(engine.current().is_none());
    }

    #[test]
    fn rejects_out_of_order_answer_without_advancing() {
        let mut engine = ReadinessQuestionEngine::with_questions(two_questions());
        let err = engine.answer(2, 0).unwrap_err();
        assert_eq!(err, AnswerError::OutOfOrder { id: 2, expected: 1 });
        assert_eq!(engine.current().map(|q| q.id), Some(1));
        assert!(engine.answers().is_empty());
    }

    #[test]
    fn rejects_out_of_range_option_without_advancing() {
        let mut engine = ReadinessQuestionEngine::with_questions(two_questions());
        let err = engine.answer(1, 5).unwrap_err();
        assert_eq!(
            err,
            AnswerError::UnknownOption {
                id: 1,
                choice: 5,
                available: 2
            }
        );
        assert_eq!(engine.current().map(|q| q.id), Some(1));
    }

    #[test]
    fn rejects_answers_after_completion() {
        let mut engine = ReadinessQuestionEngine::with_questions(two_questions());
        engine.answer(1, 0).expect("valid");
        engine.answer(2, 0).expect("valid");
        assert_eq!(engine.answer(1, 0).unwrap_err(), AnswerError::Complete);
    }

    #[test]
    fn built_in_library_runs_to_completion() {
        let mut engine = ReadinessQuestionEngine::new();
        let total = engine.progress().1;
        while let Some(q) = engine.current().cloned() {
            engine.answer(q.id, 0).expect("first option is always valid");
        }
        assert!(engine.is_complete());
        assert_eq!(engine.answers().len(), total);
    }

    #[test]
    fn profile_derives_from_best_answers() {
        let mut engine = ReadinessQuestionEngine::new();
        while let Some(q) = engine.current().cloned() {
            engine
                .answer(q.id, q.options.len() - 1)
                .expect("last option is valid");
        }
        let questions = engine.questions().to_vec();
        let answers = engine.into_answers();
        let profile = answers.profile(&questions).expect("complete set");
        assert!(profile.has_spoken_to_users);
        assert!(profile.can_build);
        assert_eq!(profile.hours_per_week, "More than 30");
    }

    #[test]
    fn profile_is_none_while_incomplete() {
        let engine = ReadinessQuestionEngine::new();
        let questions = engine.questions().to_vec();
        assert!(engine.answers().profile(&questions).is_none());
    }
}
