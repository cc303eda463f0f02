use chrono::{DateTime, Utc};

use exam_core::model::{
    AttemptId, ExamId, ExamOutcome, ExamSettings, FinishReason, Mode, Notification,
    NotificationId, Question, QuestionId, Severity,
};
use exam_core::scoring;

use super::navigator::Navigator;
use super::progress::ExamProgress;
use super::view::{ExamSnapshot, QuestionView};
use crate::notifications::NotificationQueue;
use crate::timer::{TimerEvent, TimerEventKind};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at an exam: the mode state machine plus everything it owns.
///
/// Fully synchronous; the async countdown lives outside and feeds events in
/// through `handle_timer_event`. All mutating commands funnel through this
/// type, so the submit-vs-expiry race resolves here: the first arrival flips
/// the mode to `Completed` and bumps the epoch, the second observes that and
/// does nothing. Scoring runs exactly once.
pub struct ExamSession {
    exam_id: ExamId,
    attempt_id: AttemptId,
    settings: ExamSettings,
    mode: Mode,
    navigator: Navigator,
    notifications: NotificationQueue,
    epoch: u64,
    remaining_secs: Option<u32>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    finish_reason: Option<FinishReason>,
    outcome: Option<ExamOutcome>,
}

impl ExamSession {
    /// Creates a session over the given questions.
    ///
    /// An empty question list is permitted; submitting such a session yields
    /// the degenerate outcome. If the settings open in exam mode the first
    /// countdown is already armed (epoch 1) and the caller is expected to
    /// start the timer for it.
    #[must_use]
    pub fn new(
        exam_id: ExamId,
        questions: Vec<Question>,
        settings: ExamSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let starts_timed = settings.starts_in_exam_mode();
        let duration = settings.duration_secs();
        Self {
            exam_id,
            attempt_id: AttemptId::generate(),
            notifications: NotificationQueue::new(settings.clone()),
            settings,
            mode: if starts_timed { Mode::Exam } else { Mode::Practice },
            navigator: Navigator::new(questions),
            epoch: u64::from(starts_timed),
            remaining_secs: starts_timed.then_some(duration),
            started_at: now,
            completed_at: None,
            finish_reason: None,
            outcome: None,
        }
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────
    //

    /// Switches between practice and exam mode.
    ///
    /// Returns the new mode, or `None` if the session is completed. Entering
    /// exam mode arms a fresh countdown (new epoch, full duration); leaving
    /// it invalidates the running one and discards the remaining time.
    pub fn toggle_mode(&mut self, now: DateTime<Utc>) -> Option<Mode> {
        self.notifications.sweep(now);
        match self.mode {
            Mode::Completed => None,
            Mode::Practice => {
                self.epoch += 1;
                self.remaining_secs = Some(self.settings.duration_secs());
                self.mode = Mode::Exam;
                self.notifications
                    .enqueue("Exam mode started", Severity::Info, now);
                Some(Mode::Exam)
            }
            Mode::Exam => {
                self.epoch += 1;
                self.remaining_secs = None;
                self.mode = Mode::Practice;
                self.notifications
                    .enqueue("Practice mode resumed", Severity::Info, now);
                Some(Mode::Practice)
            }
        }
    }

    /// Records an answer. No-op once completed.
    pub fn select_answer(&mut self, question_id: QuestionId, choice: usize, now: DateTime<Utc>) {
        self.notifications.sweep(now);
        if self.mode.is_completed() {
            return;
        }
        self.navigator.select_answer(question_id, choice);
    }

    /// Moves the active question pointer, clamped. No-op once completed.
    pub fn go_to(&mut self, index: i64, now: DateTime<Utc>) {
        self.notifications.sweep(now);
        if self.mode.is_completed() {
            return;
        }
        self.navigator.go_to(index);
    }

    /// Submits the attempt explicitly.
    ///
    /// Returns the freshly computed outcome when this call performed the
    /// transition, `None` if the session was already completed.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Option<ExamOutcome> {
        if self.mode.is_completed() {
            return None;
        }
        Some(self.complete(FinishReason::Submitted, now))
    }

    /// Applies one countdown event.
    ///
    /// Events from a stale epoch, or arriving outside exam mode, are dropped.
    /// Returns the outcome when an `Expired` event auto-submitted the exam.
    pub fn handle_timer_event(
        &mut self,
        event: TimerEvent,
        now: DateTime<Utc>,
    ) -> Option<ExamOutcome> {
        if event.epoch != self.epoch || self.mode != Mode::Exam {
            return None;
        }
        match event.kind {
            TimerEventKind::Tick { remaining_secs } => {
                self.remaining_secs = Some(remaining_secs);
                self.notifications.sweep(now);
                None
            }
            TimerEventKind::Expired => Some(self.complete(FinishReason::TimeExpired, now)),
        }
    }

    /// Dismisses a toast. Allowed in every mode; idempotent.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Discards all per-attempt state and returns to practice mode.
    ///
    /// Issues a fresh attempt id and bumps the epoch so a countdown from the
    /// old attempt can never touch the new one.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.epoch += 1;
        self.attempt_id = AttemptId::generate();
        self.mode = Mode::Practice;
        self.remaining_secs = None;
        self.navigator.reset();
        self.notifications.clear();
        self.started_at = now;
        self.completed_at = None;
        self.finish_reason = None;
        self.outcome = None;
    }

    // The single completion path. Bumping the epoch here invalidates any
    // countdown event still in flight.
    fn complete(&mut self, reason: FinishReason, now: DateTime<Utc>) -> ExamOutcome {
        self.epoch += 1;
        self.remaining_secs = None;
        self.mode = Mode::Completed;
        self.completed_at = Some(now);
        self.finish_reason = Some(reason);

        let outcome = scoring::grade(
            self.navigator.questions(),
            self.navigator.answers(),
            self.settings.pass_threshold(),
        );
        self.outcome = Some(outcome);

        self.notifications.sweep(now);
        match reason {
            FinishReason::Submitted => self.notifications.enqueue(
                format!("Exam submitted, you scored {}%", outcome.score_percent()),
                Severity::Success,
                now,
            ),
            FinishReason::TimeExpired => self.notifications.enqueue(
                "Time is up, your exam was submitted automatically",
                Severity::Error,
                now,
            ),
        };
        outcome
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn exam_id(&self) -> ExamId {
        self.exam_id
    }

    #[must_use]
    pub fn attempt_id(&self) -> AttemptId {
        self.attempt_id
    }

    #[must_use]
    pub fn settings(&self) -> &ExamSettings {
        &self.settings
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current countdown generation. Timer events must carry this value to
    /// be accepted.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Seconds left on the countdown; `Some` only in exam mode.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.remaining_secs
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&ExamOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Toasts still visible at `now`.
    #[must_use]
    pub fn notifications(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.notifications.active(now).cloned().collect()
    }

    #[must_use]
    pub fn progress(&self) -> ExamProgress {
        let total = self.navigator.total();
        let answered = self.navigator.answered_count();
        ExamProgress {
            total,
            answered,
            unanswered: total.saturating_sub(answered),
            is_complete: self.mode.is_completed(),
        }
    }

    /// Builds the presentation-agnostic view of the whole session.
    #[must_use]
    pub fn snapshot(&self, now: DateTime<Utc>) -> ExamSnapshot {
        let current_question = self
            .navigator
            .current_question()
            .map(|q| QuestionView::from_question(q, self.navigator.selected(q.id())));
        ExamSnapshot {
            exam_id: self.exam_id,
            attempt_id: self.attempt_id,
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            current_index: self.navigator.current_index(),
            current_question,
            total_questions: self.navigator.total(),
            answered: self
                .navigator
                .questions()
                .iter()
                .map(|q| self.navigator.is_answered(q.id()))
                .collect(),
            progress: self.progress(),
            notifications: self.notifications(now),
            outcome: self.outcome,
            finish_reason: self.finish_reason,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
