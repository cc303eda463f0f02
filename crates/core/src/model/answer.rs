use std::collections::HashMap;

use crate::model::ids::QuestionId;

/// The user's recorded choices, keyed by question id.
///
/// Entries are only ever inserted or overwritten during an attempt; the sheet
/// is cleared wholesale on session reset. Last write wins per question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: HashMap<QuestionId, usize>,
}

impl AnswerSheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or overwrites the choice for a question.
    pub fn select(&mut self, question_id: QuestionId, choice: usize) {
        self.selections.insert(question_id, choice);
    }

    /// Returns the recorded choice, if any.
    #[must_use]
    pub fn selected(&self, question_id: QuestionId) -> Option<usize> {
        self.selections.get(&question_id).copied()
    }

    #[must_use]
    pub fn is_answered(&self, question_id: QuestionId) -> bool {
        self.selections.contains_key(&question_id)
    }

    /// Number of questions with a recorded choice.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Discards every recorded choice.
    pub fn clear(&mut self) {
        self.selections.clear();
    }
}
