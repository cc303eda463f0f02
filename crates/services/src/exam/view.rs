use exam_core::model::{
    AttemptId, ExamId, ExamOutcome, FinishReason, Mode, Notification, Question, QuestionId,
};

use super::progress::ExamProgress;

/// Presentation-agnostic view of one question.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub prompt: String,
    pub choices: Vec<String>,
    pub subject: Option<String>,
    pub selected: Option<usize>,
}

impl QuestionView {
    #[must_use]
    pub fn from_question(question: &Question, selected: Option<usize>) -> Self {
        Self {
            question_id: question.id(),
            prompt: question.prompt().to_owned(),
            choices: question.choices().to_vec(),
            subject: question.subject().map(str::to_owned),
            selected,
        }
    }
}

/// Everything the presentation shell needs to render a session.
///
/// Raw values only; the shell formats the countdown, score, and timestamps
/// however it likes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamSnapshot {
    pub exam_id: ExamId,
    pub attempt_id: AttemptId,
    pub mode: Mode,
    /// Seconds left on the countdown; `Some` only in exam mode.
    pub remaining_secs: Option<u32>,
    pub current_index: usize,
    pub current_question: Option<QuestionView>,
    pub total_questions: usize,
    /// Per-question answered flags, in question order.
    pub answered: Vec<bool>,
    pub progress: ExamProgress,
    pub notifications: Vec<Notification>,
    pub outcome: Option<ExamOutcome>,
    pub finish_reason: Option<FinishReason>,
}
