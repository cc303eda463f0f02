use serde::{Deserialize, Serialize};

/// The session's mode state machine.
///
/// `Practice` and `Exam` toggle freely; `Completed` is terminal until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Practice,
    Exam,
    Completed,
}

impl Mode {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Mode::Completed)
    }
}

/// How a completed session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The user submitted explicitly.
    Submitted,
    /// The countdown reached zero and the exam auto-submitted.
    TimeExpired,
}

/// Immutable scoring snapshot, computed once on completion.
///
/// Unanswered questions count as incorrect, so `incorrect` includes
/// `unanswered`. `correct + incorrect == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamOutcome {
    total: usize,
    correct: usize,
    incorrect: usize,
    unanswered: usize,
    score_percent: u8,
    passed: bool,
    degenerate: bool,
}

impl ExamOutcome {
    /// Builds the snapshot from raw counts. Only `crate::scoring` should
    /// normally construct this.
    #[must_use]
    pub fn from_counts(
        total: usize,
        correct: usize,
        unanswered: usize,
        score_percent: u8,
        passed: bool,
    ) -> Self {
        Self {
            total,
            correct,
            incorrect: total.saturating_sub(correct),
            unanswered,
            score_percent,
            passed,
            degenerate: total == 0,
        }
    }

    // Accessors
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Wrong or unanswered questions.
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.unanswered
    }

    /// Rounded percentage score (half-up).
    #[must_use]
    pub fn score_percent(&self) -> u8 {
        self.score_percent
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// True for the zero-question exam, which scores 0 and never passes.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}
