use chrono::Duration;
use exam_core::model::{ExamId, ExamSettings, FinishReason, Mode, Question, QuestionId, Severity};
use exam_core::time::fixed_now;
use services::timer::{TimerEvent, TimerEventKind};
use services::ExamSession;

fn question(id: u64, correct_index: usize) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Question {id}"),
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_index,
        Some("general".into()),
    )
    .unwrap()
}

fn exam(n: u64) -> Vec<Question> {
    (1..=n).map(|id| question(id, 0)).collect()
}

#[test]
fn full_practice_flow_scores_mixed_answers() {
    // 10 questions, 6 answered right, 2 answered wrong, 2 left open.
    let now = fixed_now();
    let mut session = ExamSession::new(
        ExamId::new(1),
        exam(10),
        ExamSettings::default_exam(),
        now,
    );

    for id in 1..=6 {
        session.select_answer(QuestionId::new(id), 0, now);
    }
    for id in 7..=8 {
        session.select_answer(QuestionId::new(id), 2, now);
    }

    let outcome = session.submit(now).unwrap();
    assert_eq!(outcome.total(), 10);
    assert_eq!(outcome.correct(), 6);
    assert_eq!(outcome.incorrect(), 4);
    assert_eq!(outcome.unanswered(), 2);
    assert_eq!(outcome.score_percent(), 60);
    assert!(outcome.passed());
    assert_eq!(session.finish_reason(), Some(FinishReason::Submitted));
}

#[test]
fn timed_flow_with_mode_switches_and_expiry() {
    let now = fixed_now();
    let settings = ExamSettings::default_exam().with_duration_secs(120).unwrap();
    let mut session = ExamSession::new(ExamId::new(2), exam(4), settings, now);

    // Warm up in practice, then go timed.
    session.select_answer(QuestionId::new(1), 0, now);
    assert_eq!(session.toggle_mode(now), Some(Mode::Exam));
    assert_eq!(session.remaining_secs(), Some(120));
    let first_epoch = session.epoch();

    // Bail out once; the old countdown is dead from here on.
    assert_eq!(session.toggle_mode(now), Some(Mode::Practice));
    assert!(session
        .handle_timer_event(
            TimerEvent {
                epoch: first_epoch,
                kind: TimerEventKind::Tick { remaining_secs: 119 },
            },
            now,
        )
        .is_none());
    assert_eq!(session.remaining_secs(), None);

    // Back in, answer one more, then the clock runs out.
    session.toggle_mode(now);
    session.select_answer(QuestionId::new(2), 0, now);
    let epoch = session.epoch();
    let outcome = session
        .handle_timer_event(
            TimerEvent {
                epoch,
                kind: TimerEventKind::Expired,
            },
            now,
        )
        .unwrap();

    assert_eq!(session.mode(), Mode::Completed);
    assert_eq!(session.finish_reason(), Some(FinishReason::TimeExpired));
    assert_eq!(outcome.correct(), 2);
    assert_eq!(outcome.unanswered(), 2);
    assert_eq!(outcome.score_percent(), 50);
    assert!(!outcome.passed());

    // Everything is frozen now.
    session.select_answer(QuestionId::new(3), 0, now);
    assert!(session.submit(now).is_none());
    assert_eq!(session.outcome().copied(), Some(outcome));
}

#[test]
fn toast_lifecycle_through_commands() {
    let now = fixed_now();
    let mut session = ExamSession::new(
        ExamId::new(3),
        exam(2),
        ExamSettings::default_exam(),
        now,
    );

    session.toggle_mode(now);
    let toasts = session.notifications(now);
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity(), Severity::Info);

    // Info toasts auto-dismiss after 3 seconds; a later command sweeps them.
    let later = now + Duration::seconds(5);
    session.go_to(1, later);
    assert!(session.notifications(later).is_empty());

    // Manual dismissal before the deadline, and dismissing twice is harmless.
    let id = {
        session.toggle_mode(later);
        session.notifications(later)[0].id()
    };
    assert!(session.dismiss_notification(id));
    assert!(!session.dismiss_notification(id));
    assert!(session.notifications(later).is_empty());
}

#[test]
fn reset_allows_a_second_attempt() {
    let now = fixed_now();
    let mut session = ExamSession::new(
        ExamId::new(4),
        exam(3),
        ExamSettings::default_exam(),
        now,
    );
    session.select_answer(QuestionId::new(1), 0, now);
    let first = session.submit(now).unwrap();
    assert_eq!(first.correct(), 1);
    let first_attempt = session.attempt_id();

    session.reset(now);
    assert_eq!(session.mode(), Mode::Practice);
    assert_ne!(session.attempt_id(), first_attempt);

    for id in 1..=3 {
        session.select_answer(QuestionId::new(id), 0, now);
    }
    let second = session.submit(now).unwrap();
    assert_eq!(second.correct(), 3);
    assert_eq!(second.score_percent(), 100);
}
