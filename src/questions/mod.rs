//! Questions and the per-path question bank.

pub mod bank;
pub mod question;

pub use bank::QuestionBank;
pub use question::{AnswerOption, Question, QuestionId};
