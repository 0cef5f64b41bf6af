//! Identity challenges
//!
//! The re-authentication state machine. The caller renders the prompt,
//! collects answers, and feeds them to [`Challenge::submit`] until the
//! challenge passes or the attempts run out. A challenge never touches
//! the stored confirmation record.

use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::confirm::bank::QuestionBank;
use crate::error::ConfirmError;
use crate::users::record::ConfirmationRecord;

/// The function behind the secret-function variant.
pub fn secret_function(a: f64, x: f64) -> f64 {
    (a * x).exp()
}

/// Answers are compared at two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    Question,
    SecretFunction,
}

/// Outcome of one submitted answer that did not end the challenge.
#[derive(Debug, PartialEq)]
pub enum Submission {
    Passed,
    Retry { remaining: u32 },
}

#[derive(Debug)]
enum Expected {
    Text(String),
    Value(f64),
}

/// One in-flight identity check.
#[derive(Debug)]
pub struct Challenge {
    kind: ChallengeKind,
    prompt: String,
    expected: Expected,
    attempts_left: u32,
}

impl Challenge {
    /// Draws a challenge from the user's confirmation record: one of
    /// the stored questions at random, or a fresh x in [0, 100] for the
    /// secret function.
    pub fn begin(
        record: &ConfirmationRecord,
        bank: &QuestionBank,
        attempts: u32,
    ) -> Result<Self, ConfirmError> {
        match record {
            ConfirmationRecord::Questions(questions) => {
                let mut rng = rand::thread_rng();
                // an empty list only occurs on a hand-damaged record
                let picked = questions
                    .choose(&mut rng)
                    .ok_or(ConfirmError::UnknownQuestion(0))?;
                let text = bank.question(picked.index)?;
                Ok(Challenge {
                    kind: ChallengeKind::Question,
                    prompt: text.to_string(),
                    expected: Expected::Text(picked.answer.clone()),
                    attempts_left: attempts,
                })
            }
            ConfirmationRecord::Function { parameter } => {
                let x: u32 = rand::thread_rng().gen_range(0..=100);
                Ok(Challenge {
                    kind: ChallengeKind::SecretFunction,
                    prompt: format!("x = {}", x),
                    expected: Expected::Value(secret_function(*parameter, f64::from(x))),
                    attempts_left: attempts,
                })
            }
        }
    }

    pub fn kind(&self) -> ChallengeKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// Checks one answer. Numeric answers that fail to parse count as
    /// wrong rather than aborting the challenge.
    pub fn submit(&mut self, answer: &str) -> Result<Submission, ConfirmError> {
        let correct = match &self.expected {
            Expected::Text(expected) => answer.trim() == expected,
            Expected::Value(expected) => answer
                .trim()
                .parse::<f64>()
                .map(|value| round2(value) == round2(*expected))
                .unwrap_or(false),
        };
        if correct {
            return Ok(Submission::Passed);
        }
        self.attempts_left = self.attempts_left.saturating_sub(1);
        if self.attempts_left == 0 {
            warn!("Identity challenge exhausted");
            return Err(ConfirmError::IdentificationFailed);
        }
        Ok(Submission::Retry {
            remaining: self.attempts_left,
        })
    }
}
