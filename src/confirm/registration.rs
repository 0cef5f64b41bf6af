//! Registration
//!
//! First-password setup: the user picks a confirmation variant and the
//! shell collects the material later challenges will verify against.

use rand::seq::index::sample;

use crate::confirm::bank::QuestionBank;
use crate::error::ConfirmError;

/// The question variant stores answers to this many distinct questions.
pub const DRAWN_QUESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationChoice {
    Questions,
    SecretFunction,
}

impl RegistrationChoice {
    /// "1" selects questions, "2" the secret function.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(RegistrationChoice::Questions),
            "2" => Some(RegistrationChoice::SecretFunction),
            _ => None,
        }
    }
}

/// One question to put to the user during registration.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPrompt {
    pub index: usize,
    pub text: String,
}

/// Draws [`DRAWN_QUESTIONS`] distinct questions from the bank,
/// uniformly at random.
pub fn draw_question_prompts(bank: &QuestionBank) -> Result<Vec<QuestionPrompt>, ConfirmError> {
    if bank.len() < DRAWN_QUESTIONS {
        return Err(ConfirmError::BankTooSmall(bank.len()));
    }
    let mut rng = rand::thread_rng();
    let picks = sample(&mut rng, bank.len(), DRAWN_QUESTIONS);

    let mut prompts = Vec::with_capacity(DRAWN_QUESTIONS);
    for position in picks.iter() {
        let index = position + 1;
        prompts.push(QuestionPrompt {
            index,
            text: bank.question(index)?.to_string(),
        });
    }
    Ok(prompts)
}
