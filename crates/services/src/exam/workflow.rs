use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rng;
use rand::seq::SliceRandom;

use exam_core::model::{
    ExamId, ExamOutcome, ExamSettings, FinishReason, Mode, NotificationId, QuestionId,
};
use exam_core::Clock;

use super::session::ExamSession;
use super::view::ExamSnapshot;
use crate::analytics::{track_detached, AnalyticsEvent, AnalyticsSink, NoopAnalyticsSink};
use crate::error::SessionError;
use crate::source::QuestionSource;
use crate::timer::CountdownTimer;

//
// ─── LOOP SERVICE ──────────────────────────────────────────────────────────────
//

/// Orchestrates exam start: loads questions, applies settings, wires the
/// live handle, and reports the start to analytics.
#[derive(Clone)]
pub struct ExamLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    analytics: Arc<dyn AnalyticsSink>,
    settings: ExamSettings,
}

impl ExamLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>, settings: ExamSettings) -> Self {
        Self {
            clock,
            source,
            analytics: Arc::new(NoopAnalyticsSink),
            settings,
        }
    }

    #[must_use]
    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Start a new session for the given exam.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the question source fails.
    pub async fn start_exam(&self, exam_id: ExamId) -> Result<ExamHandle, SessionError> {
        let mut questions = self.source.load_questions(exam_id).await?;
        if self.settings.shuffle_questions() {
            questions.shuffle(&mut rng());
        }

        let session = ExamSession::new(exam_id, questions, self.settings.clone(), self.clock.now());
        let started = AnalyticsEvent::SessionStarted {
            exam_id,
            attempt_id: session.attempt_id(),
            mode: session.mode(),
            question_count: session.navigator().total(),
            at: session.started_at(),
        };

        let handle = ExamHandle::new(session, self.clock, Arc::clone(&self.analytics));
        track_detached(Arc::clone(&self.analytics), started);
        Ok(handle)
    }
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Live handle over one session: the single serialization point for every
/// command, and the owner of the countdown task.
///
/// All commands lock the session briefly and return immediately; the
/// countdown task feeds its events through the same lock, so the
/// submit-vs-expiry race is decided inside `ExamSession`, never here.
/// Dropping the handle aborts the countdown. Must live inside a tokio
/// runtime.
pub struct ExamHandle {
    session: Arc<Mutex<ExamSession>>,
    timer: CountdownTimer,
    clock: Clock,
    analytics: Arc<dyn AnalyticsSink>,
}

impl std::fmt::Debug for ExamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamHandle")
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl ExamHandle {
    /// Wraps a session. If it already opened in exam mode the countdown is
    /// started immediately.
    #[must_use]
    pub fn new(session: ExamSession, clock: Clock, analytics: Arc<dyn AnalyticsSink>) -> Self {
        let armed = session
            .remaining_secs()
            .map(|duration| (session.epoch(), duration));
        let mut handle = Self {
            session: Arc::new(Mutex::new(session)),
            timer: CountdownTimer::new(),
            clock,
            analytics,
        };
        if let Some((epoch, duration)) = armed {
            handle.start_countdown(epoch, duration);
        }
        handle
    }

    /// Switches between practice and exam mode, starting or cancelling the
    /// countdown to match. No-op once completed.
    pub fn toggle_mode(&mut self) {
        let now = self.clock.now();
        let armed = {
            let mut session = self.lock_session();
            match session.toggle_mode(now) {
                Some(Mode::Exam) => Some((session.epoch(), session.settings().duration_secs())),
                _ => None,
            }
        };
        match armed {
            Some((epoch, duration)) => self.start_countdown(epoch, duration),
            None => self.timer.cancel(),
        }
    }

    /// Records an answer. No-op once completed.
    pub fn select_answer(&mut self, question_id: QuestionId, choice: usize) {
        let now = self.clock.now();
        self.lock_session().select_answer(question_id, choice, now);
    }

    /// Moves the active question pointer, clamped.
    pub fn go_to(&mut self, index: i64) {
        let now = self.clock.now();
        self.lock_session().go_to(index, now);
    }

    /// Submits the attempt. Returns the outcome when this call completed the
    /// session, `None` if it already was.
    pub fn submit(&mut self) -> Option<ExamOutcome> {
        let now = self.clock.now();
        let completed = {
            let mut session = self.lock_session();
            session
                .submit(now)
                .map(|outcome| (outcome, completed_event(&session, outcome)))
        };
        let (outcome, event) = completed?;
        self.timer.cancel();
        track_detached(Arc::clone(&self.analytics), event);
        Some(outcome)
    }

    /// Dismisses a toast; idempotent.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.lock_session().dismiss_notification(id)
    }

    /// Discards all per-attempt state and returns to practice mode.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.timer.cancel();
        let event = {
            let mut session = self.lock_session();
            session.reset(now);
            AnalyticsEvent::SessionReset {
                exam_id: session.exam_id(),
                attempt_id: session.attempt_id(),
                at: now,
            }
        };
        track_detached(Arc::clone(&self.analytics), event);
    }

    /// Current view of the whole session.
    #[must_use]
    pub fn snapshot(&self) -> ExamSnapshot {
        self.lock_session().snapshot(self.clock.now())
    }

    fn start_countdown(&mut self, epoch: u64, duration_secs: u32) {
        let session = Arc::clone(&self.session);
        let analytics = Arc::clone(&self.analytics);
        let clock = self.clock;
        self.timer.start(epoch, duration_secs, move |event| {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            let completed = guard
                .handle_timer_event(event, clock.now())
                .map(|outcome| completed_event(&guard, outcome));
            drop(guard);
            if let Some(event) = completed {
                track_detached(Arc::clone(&analytics), event);
            }
        });
    }

    fn lock_session(&self) -> MutexGuard<'_, ExamSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn completed_event(session: &ExamSession, outcome: ExamOutcome) -> AnalyticsEvent {
    AnalyticsEvent::SessionCompleted {
        exam_id: session.exam_id(),
        attempt_id: session.attempt_id(),
        reason: session.finish_reason().unwrap_or(FinishReason::Submitted),
        score_percent: outcome.score_percent(),
        passed: outcome.passed(),
        total: outcome.total(),
        correct: outcome.correct(),
        at: session.completed_at().unwrap_or_else(|| session.started_at()),
    }
}
