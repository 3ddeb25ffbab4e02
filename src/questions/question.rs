//! Question records.
//!
//! A question has a stable id within its path, the prompt text, and an
//! ordered list of answer options. Exactly one option is correct. Option
//! order is preserved because clients render the labels in that order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ConfigError, PathKind};

/// Question identifier, unique within a path.
pub type QuestionId = u32;

/// One selectable answer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub correct: bool,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, correct: bool) -> Self {
        Self {
            label: label.into(),
            correct,
        }
    }
}

/// A question with its correctness map.
///
/// ## Example
///
/// ```
/// use maze_quiz::questions::Question;
///
/// let q = Question::new(1, "Which command lists files?")
///     .with_correct("ls")
///     .with_wrong("cd");
///
/// assert!(q.is_correct("ls"));
/// assert!(!q.is_correct("cd"));
/// assert!(!q.is_correct("LS"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Most questions carry four options.
    pub options: SmallVec<[AnswerOption; 4]>,
}

impl Question {
    /// Create a question with no options yet.
    pub fn new(id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            options: SmallVec::new(),
        }
    }

    /// Append the correct option.
    #[must_use]
    pub fn with_correct(mut self, label: impl Into<String>) -> Self {
        self.options.push(AnswerOption::new(label, true));
        self
    }

    /// Append a wrong option.
    #[must_use]
    pub fn with_wrong(mut self, label: impl Into<String>) -> Self {
        self.options.push(AnswerOption::new(label, false));
        self
    }

    /// Exact, case-sensitive match against the option labels.
    /// Unknown answers are wrong.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.options
            .iter()
            .any(|o| o.correct && o.label == answer)
    }

    /// Option labels in display order, without correctness.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }

    pub(crate) fn validate(&self, path: PathKind) -> Result<(), ConfigError> {
        let found = self.options.iter().filter(|o| o.correct).count();
        if found != 1 {
            return Err(ConfigError::CorrectOptionCount {
                path,
                id: self.id,
                found,
            });
        }
        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].iter().any(|o| o.label == option.label) {
                return Err(ConfigError::DuplicateOption {
                    path,
                    id: self.id,
                    label: option.label.clone(),
                });
            }
        }
        Ok(())
    }
}
