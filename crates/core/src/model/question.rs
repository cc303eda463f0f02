use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must offer at least two choices")]
    TooFewChoices,

    #[error("choice {index} cannot be empty")]
    EmptyChoice { index: usize },

    #[error("correct choice index {index} is out of range for {count} choices")]
    CorrectIndexOutOfRange { index: usize, count: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Immutable once loaded; the answer key lives here, scoring happens in
/// `crate::scoring`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    subject: Option<String>,
}

impl Question {
    /// Creates a new Question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two choices
    /// are given, any choice is blank, or the correct index is out of range.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
        subject: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if choices.len() < 2 {
            return Err(QuestionError::TooFewChoices);
        }
        if let Some(index) = choices.iter().position(|c| c.trim().is_empty()) {
            return Err(QuestionError::EmptyChoice { index });
        }
        if correct_index >= choices.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                count: choices.len(),
            });
        }

        let subject = subject
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        Ok(Self {
            id,
            prompt: prompt.trim().to_owned(),
            choices: choices.into_iter().map(|c| c.trim().to_owned()).collect(),
            correct_index,
            subject,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns true if the given choice index is the answer key.
    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
