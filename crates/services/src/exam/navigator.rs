use exam_core::model::{AnswerSheet, Question, QuestionId};

/// Ordered question list plus the user's position and recorded answers.
///
/// Pure bookkeeping: no scoring, no mode awareness. The session decides when
/// commands are allowed; the navigator only normalizes them (unknown ids and
/// out-of-range input are ignored or clamped, never errors).
#[derive(Debug, Clone)]
pub struct Navigator {
    questions: Vec<Question>,
    current: usize,
    answers: AnswerSheet,
}

impl Navigator {
    /// Creates a navigator positioned on the first question. An empty list is
    /// permitted.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            answers: AnswerSheet::new(),
        }
    }

    /// Records or overwrites the choice for a question.
    ///
    /// No-op if the id is unknown or the choice index is out of range for
    /// that question.
    pub fn select_answer(&mut self, question_id: QuestionId, choice: usize) {
        let Some(question) = self.questions.iter().find(|q| q.id() == question_id) else {
            return;
        };
        if choice >= question.choice_count() {
            return;
        }
        self.answers.select(question_id, choice);
    }

    /// Moves the active question pointer, clamping to `[0, count - 1]`.
    ///
    /// No-op on an empty question set.
    pub fn go_to(&mut self, index: i64) {
        if self.questions.is_empty() {
            return;
        }
        let last = self.questions.len() - 1;
        let clamped = index.clamp(0, i64::try_from(last).unwrap_or(i64::MAX));
        self.current = usize::try_from(clamped).unwrap_or(last);
    }

    /// Resets position and answers for a fresh attempt.
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers.clear();
    }

    // Accessors
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    #[must_use]
    pub fn selected(&self, question_id: QuestionId) -> Option<usize> {
        self.answers.selected(question_id)
    }

    #[must_use]
    pub fn is_answered(&self, question_id: QuestionId) -> bool {
        self.answers.is_answered(question_id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
