//! Readiness scorer: folds a complete answer set into a graded verdict.
//!
//! Scoring is a pure function of the answer set, the question library, and
//! the grade policy. Verdict text is template selection keyed by grade, so
//! the whole result is deterministic and testable without a model call.

use serde::Serialize;
use thiserror::Error;

use super::engine::SurveyAnswerSet;
use super::questions::{load_questions, ReadinessQuestion};

/// Grade thresholds (minimum score for each grade). Policy constants; the
/// exact cut points come from product, not from the algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradePolicy {
    pub a_plus: u32,
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
}

impl Default for GradePolicy {
    fn default() -> Self {
        Self {
            a_plus: 90,
            a: 80,
            b: 65,
            c: 50,
            d: 35,
        }
    }
}

impl GradePolicy {
    /// Map a clamped score to its grade.
    pub fn grade_for(&self, score: u32) -> Grade {
        if score >= self.a_plus {
            Grade::APlus
        } else if score >= self.a {
            Grade::A
        } else if score >= self.b {
            Grade::B
        } else if score >= self.c {
            Grade::C
        } else if score >= self.d {
            Grade::D
        } else {
            Grade::F
        }
    }
}

/// Letter grade for a readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

/// The scored assessment. Immutable once computed; never partially built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessResult {
    /// Total score, clamped to 0-100.
    pub score: u32,
    pub grade: Grade,
    /// Weakness labels in question order. At most one per question.
    pub blindspots: Vec<String>,
    /// Deterministic summary text selected by grade.
    pub verdict: String,
}

/// Why an answer set could not be scored. Caller misuse; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("assessment incomplete: no answer for question(s) {missing:?}")]
    Incomplete { missing: Vec<u32> },

    #[error("answer references unknown question id {id}")]
    UnknownQuestion { id: u32 },

    #[error("answer for question {id} has out-of-range option {choice}")]
    InvalidChoice { id: u32, choice: usize },
}

/// Scores complete answer sets against a question library and grade policy.
#[derive(Debug)]
pub struct ReadinessScorer {
    questions: Vec<ReadinessQuestion>,
    policy: GradePolicy,
}

impl Default for ReadinessScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessScorer {
    /// Scorer over the built-in library with the default grade policy.
    pub fn new() -> Self {
        Self::with_questions(load_questions(), GradePolicy::default())
    }

    /// Scorer over an explicit library and policy.
    pub fn with_questions(questions: Vec<ReadinessQuestion>, policy: GradePolicy) -> Self {
        Self { questions, policy }
    }

    /// Score a complete answer set.
    ///
    /// Requires every question id to be answered exactly once; missing or
    /// unknown ids are rejected rather than scored as zero.
    pub fn score(&self, answers: &SurveyAnswerSet) -> Result<ReadinessResult, ScoreError> {
        for (id, _) in answers.iter() {
            if !self.questions.iter().any(|q| q.id == id) {
                return Err(ScoreError::UnknownQuestion { id });
            }
        }

        let missing: Vec<u32> = self
            .questions
            .iter()
            .filter(|q| answers.get(q.id).is_none())
            .map(|q| q.id)
            .collect();
        if !missing.is_empty() {
            return Err(ScoreError::Incomplete { missing });
        }

        let mut total = 0u32;
        let mut blindspots = Vec::new();

        for question in &self.questions {
            // Coverage was checked above.
            let Some(choice) = answers.get(question.id) else {
                return Err(ScoreError::Incomplete {
                    missing: vec![question.id],
                });
            };
            let Some(weight) = question.weights.get(choice).copied() else {
                return Err(ScoreError::InvalidChoice {
                    id: question.id,
                    choice,
                });
            };

            total += weight;
            if weight < question.safe {
                blindspots.push(question.blindspot.clone());
            }
        }

        let score = total.min(100);
        let grade = self.policy.grade_for(score);

        Ok(ReadinessResult {
            score,
            grade,
            blindspots,
            verdict: verdict_for(grade).to_string(),
        })
    }
}

/// Verdict template per grade.
fn verdict_for(grade: Grade) -> &'static str {
    match grade {
        Grade::APlus => {
            "Exceptional readiness. You have both the time and the evidence to \
             execute. Start building this week."
        }
        Grade::A => {
            "Strong position. One or two inputs could be stronger, but nothing \
             here should stop you from shipping."
        }
        Grade::B => {
            "Solid foundation with real gaps. Close the flagged blind spots \
             before committing serious money."
        }
        Grade::C => {
            "Promising but underprepared. Treat the next month as de-risking \
             rather than building."
        }
        Grade::D => {
            "High risk right now. Most of the key inputs are missing, so \
             validate the problem before writing code."
        }
        Grade::F => {
            "Not ready yet. Carve out weekly time and talk to real users \
             before anything else."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers_for(choices: &[(u32, usize)]) -> SurveyAnswerSet {
        let mut set = SurveyAnswerSet::new();
        for (id, choice) in choices {
            set.insert(*id, *choice);
        }
        set
    }

    /// Answer every library question with its best option.
    fn best_answers(scorer: &ReadinessScorer) -> SurveyAnswerSet {
        let mut set = SurveyAnswerSet::new();
        for q in &scorer.questions {
            let best = q
                .weights
                .iter()
                .enumerate()
                .max_by_key(|(_, w)| **w)
                .map(|(i, _)| i)
                .unwrap_or(0);
            set.insert(q.id, best);
        }
        set
    }

    /// Answer every library question with its worst option.
    fn worst_answers(scorer: &ReadinessScorer) -> SurveyAnswerSet {
        let mut set = SurveyAnswerSet::new();
        for q in &scorer.questions {
            let worst = q
                .weights
                .iter()
                .enumerate()
                .min_by_key(|(_, w)| **w)
                .map(|(i, _)| i)
                .unwrap_or(0);
            set.insert(q.id, worst);
        }
        set
    }

    #[test]
    fn perfect_answers_score_one_hundred() {
        let scorer = ReadinessScorer::new();
        let result = scorer.score(&best_answers(&scorer)).expect("complete set");
        assert_eq!(result.score, 100);
        assert_eq!(result.grade, Grade::APlus);
        assert!(result.blindspots.is_empty());
    }

    #[test]
    fn worst_answers_flag_every_blindspot() {
        let scorer = ReadinessScorer::new();
        let result = scorer.score(&worst_answers(&scorer)).expect("complete set");
        assert!(result.score <= 35);
        assert_eq!(result.blindspots.len(), scorer.questions.len());
        // Blind spots follow question order.
        let expected: Vec<&str> = scorer
            .questions
            .iter()
            .map(|q| q.blindspot.as_str())
            .collect();
        let actual: Vec<&str> = result.blindspots.iter().map(|s| s.as_str()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = ReadinessScorer::new();
        let answers = best_answers(&scorer);
        let first = scorer.score(&answers).expect("complete");
        let second = scorer.score(&answers).expect("complete");
        assert_eq!(first, second);
    }

    #[test]
    fn score_is_always_in_range() {
        let scorer = ReadinessScorer::new();
        // Walk every uniform choice the library permits.
        let max_options = scorer
            .questions
            .iter()
            .map(|q| q.options.len())
            .min()
            .unwrap_or(0);
        for choice in 0..max_options {
            let mut set = SurveyAnswerSet::new();
            for q in &scorer.questions {
                set.insert(q.id, choice);
            }
            let result = scorer.score(&set).expect("complete");
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn rejects_incomplete_answer_set() {
        let scorer = ReadinessScorer::new();
        let mut answers = best_answers(&scorer);
        // Rebuild without the first question.
        let first_id = scorer.questions[0].id;
        let partial: Vec<(u32, usize)> = answers
            .iter()
            .filter(|(id, _)| *id != first_id)
            .collect();
        answers = answers_for(&partial);

        let err = scorer.score(&answers).unwrap_err();
        assert_eq!(
            err,
            ScoreError::Incomplete {
                missing: vec![first_id]
            }
        );
    }

    #[test]
    fn rejects_unknown_question_id() {
        let scorer = ReadinessScorer::new();
        let mut answers = best_answers(&scorer);
        answers.insert(999, 0);
        let err = scorer.score(&answers).unwrap_err();
        assert_eq!(err, ScoreError::UnknownQuestion { id: 999 });
    }

    #[test]
    fn rejects_out_of_range_choice() {
        let scorer = ReadinessScorer::new();
        let mut answers = best_answers(&scorer);
        let first_id = scorer.questions[0].id;
        answers.insert(first_id, 99);
        let err = scorer.score(&answers).unwrap_err();
        assert_eq!(
            err,
            ScoreError::InvalidChoice {
                id: first_id,
                choice: 99
            }
        );
    }

    #[test]
    fn grade_thresholds_are_exact_at_cut_points() {
        let policy = GradePolicy::default();
        assert_eq!(policy.grade_for(100), Grade::APlus);
        assert_eq!(policy.grade_for(90), Grade::APlus);
        assert_eq!(policy.grade_for(89), Grade::A);
        assert_eq!(policy.grade_for(80), Grade::A);
        assert_eq!(policy.grade_for(79), Grade::B);
        assert_eq!(policy.grade_for(65), Grade::B);
        assert_eq!(policy.grade_for(64), Grade::C);
        assert_eq!(policy.grade_for(50), Grade::C);
        assert_eq!(policy.grade_for(49), Grade::D);
        assert_eq!(policy.grade_for(35), Grade::D);
        assert_eq!(policy.grade_for(34), Grade::F);
        assert_eq!(policy.grade_for(0), Grade::F);
    }

    #[test]
    fn grade_displays_as_letter() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::F.to_string(), "F");
    }

    #[test]
    fn verdict_tracks_grade() {
        let scorer = ReadinessScorer::new();
        let best = scorer.score(&best_answers(&scorer)).expect("complete");
        let worst = scorer.score(&worst_answers(&scorer)).expect("complete");
        assert_ne!(best.verdict, worst.verdict);
        assert_eq!(best.verdict, verdict_for(best.grade));
    }
}
