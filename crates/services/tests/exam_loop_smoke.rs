use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use exam_core::model::{ExamId, ExamSettings, FinishReason, Mode, Question, QuestionId};
use exam_core::time::fixed_now;
use services::{
    AnalyticsError, AnalyticsEvent, AnalyticsSink, Clock, ExamLoopService, InMemoryQuestionBank,
};

//
// ─── HELPERS ───────────────────────────────────────────────────────────────────
//

#[derive(Clone, Default)]
struct RecordingSink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    fn completed_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, AnalyticsEvent::SessionCompleted { .. }))
            .count()
    }
}

#[async_trait]
impl AnalyticsSink for RecordingSink {
    async fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

struct FailingSink;

#[async_trait]
impl AnalyticsSink for FailingSink {
    async fn track(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        Err(AnalyticsError::Disabled)
    }
}

fn bank(exam_id: ExamId, n: u64) -> InMemoryQuestionBank {
    let bank = InMemoryQuestionBank::new();
    let questions = (1..=n)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("Q{id}"),
                vec!["a".into(), "b".into()],
                0,
                None,
            )
            .unwrap()
        })
        .collect();
    bank.insert_exam(exam_id, questions);
    bank
}

fn loop_service(exam_id: ExamId, n: u64, settings: ExamSettings) -> (ExamLoopService, RecordingSink) {
    let sink = RecordingSink::default();
    let service = ExamLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(bank(exam_id, n)),
        settings,
    )
    .with_analytics(Arc::new(sink.clone()));
    (service, sink)
}

/// Lets already-woken tasks (timer callbacks, detached analytics) run without
/// advancing the paused clock.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[tokio::test(start_paused = true)]
async fn countdown_ticks_show_up_in_snapshots() {
    let exam_id = ExamId::new(1);
    let settings = ExamSettings::default_exam()
        .with_duration_secs(30)
        .unwrap()
        .with_starts_in_exam_mode(true);
    let (service, sink) = loop_service(exam_id, 3, settings);

    let handle = service.start_exam(exam_id).await.unwrap();
    settle().await;

    assert_eq!(handle.snapshot().remaining_secs, Some(30));

    tokio::time::advance(Duration::from_secs(2)).await;
    settle().await;

    let snap = handle.snapshot();
    assert_eq!(snap.mode, Mode::Exam);
    assert_eq!(snap.remaining_secs, Some(28));

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], AnalyticsEvent::SessionStarted { .. }));
}

#[tokio::test(start_paused = true)]
async fn submit_racing_expiry_scores_once() {
    let exam_id = ExamId::new(2);
    let settings = ExamSettings::default_exam()
        .with_duration_secs(1)
        .unwrap()
        .with_starts_in_exam_mode(true);
    let (service, sink) = loop_service(exam_id, 2, settings);

    let mut handle = service.start_exam(exam_id).await.unwrap();
    handle.select_answer(QuestionId::new(1), 0);
    settle().await;

    // Move the clock past the deadline and submit in the same window. Either
    // side may win the race; exactly one of them completes the session.
    tokio::time::advance(Duration::from_secs(1)).await;
    let submitted = handle.submit();
    settle().await;

    let snap = handle.snapshot();
    assert_eq!(snap.mode, Mode::Completed);
    let outcome = snap.outcome.expect("session scored");
    assert_eq!(outcome.correct(), 1);

    match snap.finish_reason.expect("finish reason recorded") {
        FinishReason::Submitted => assert_eq!(submitted, Some(outcome)),
        FinishReason::TimeExpired => assert_eq!(submitted, None),
    }

    // Late arrivals change nothing; scoring ran exactly once.
    assert!(handle.submit().is_none());
    settle().await;
    assert_eq!(sink.completed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn expiry_auto_submits_exactly_once() {
    let exam_id = ExamId::new(3);
    let settings = ExamSettings::default_exam()
        .with_duration_secs(2)
        .unwrap()
        .with_starts_in_exam_mode(true);
    let (service, sink) = loop_service(exam_id, 2, settings);

    let mut handle = service.start_exam(exam_id).await.unwrap();
    handle.select_answer(QuestionId::new(1), 0);
    settle().await;

    tokio::time::advance(Duration::from_secs(5)).await;
    settle().await;

    let snap = handle.snapshot();
    assert_eq!(snap.mode, Mode::Completed);
    assert_eq!(snap.finish_reason, Some(FinishReason::TimeExpired));
    assert_eq!(snap.outcome.unwrap().score_percent(), 50);

    // A late manual submit is a no-op.
    assert!(handle.submit().is_none());
    settle().await;
    assert_eq!(sink.completed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn leaving_exam_mode_silences_the_countdown() {
    let exam_id = ExamId::new(4);
    let settings = ExamSettings::default_exam()
        .with_duration_secs(3)
        .unwrap()
        .with_starts_in_exam_mode(true);
    let (service, sink) = loop_service(exam_id, 2, settings);

    let mut handle = service.start_exam(exam_id).await.unwrap();
    settle().await;

    handle.toggle_mode();
    settle().await;
    assert_eq!(handle.snapshot().mode, Mode::Practice);

    // Way past the original deadline: no tick, no auto-submit.
    tokio::time::advance(Duration::from_secs(60)).await;
    settle().await;

    let snap = handle.snapshot();
    assert_eq!(snap.mode, Mode::Practice);
    assert_eq!(snap.remaining_secs, None);
    assert_eq!(snap.outcome, None);
    assert_eq!(sink.completed_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn reset_restarts_with_a_new_attempt() {
    let exam_id = ExamId::new(5);
    let (service, sink) = loop_service(exam_id, 2, ExamSettings::default_exam());

    let mut handle = service.start_exam(exam_id).await.unwrap();
    handle.select_answer(QuestionId::new(1), 0);
    handle.submit();
    settle().await;

    let before = handle.snapshot();
    handle.reset();
    settle().await;
    let after = handle.snapshot();

    assert_eq!(after.mode, Mode::Practice);
    assert_eq!(after.outcome, None);
    assert_ne!(after.attempt_id, before.attempt_id);
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, AnalyticsEvent::SessionReset { .. })));
}

#[tokio::test(start_paused = true)]
async fn analytics_failures_never_touch_the_session() {
    let exam_id = ExamId::new(6);
    let service = ExamLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(bank(exam_id, 2)),
        ExamSettings::default_exam(),
    )
    .with_analytics(Arc::new(FailingSink));

    let mut handle = service.start_exam(exam_id).await.unwrap();
    handle.select_answer(QuestionId::new(1), 0);
    let outcome = handle.submit().unwrap();
    settle().await;

    assert_eq!(outcome.correct(), 1);
    assert_eq!(handle.snapshot().mode, Mode::Completed);
}

#[tokio::test(start_paused = true)]
async fn unknown_exam_id_fails_to_start() {
    let (service, _sink) = loop_service(ExamId::new(7), 2, ExamSettings::default_exam());
    let err = service.start_exam(ExamId::new(999)).await.unwrap_err();
    assert!(matches!(err, services::SessionError::Source(_)));
}
