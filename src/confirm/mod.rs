//! Confirmation module
//!
//! Identity confirmation: the question bank, registration draws, and
//! the challenge state machine used for periodic re-authentication.

pub mod bank;
pub mod challenge;
pub mod registration;

pub use bank::{QuestionBank, questions_path};
pub use challenge::{Challenge, ChallengeKind, Submission, secret_function};
pub use registration::{DRAWN_QUESTIONS, QuestionPrompt, RegistrationChoice, draw_question_prompts};
