//! Pure scoring of a finished attempt.

use crate::model::{AnswerSheet, ExamOutcome, Question};

/// Grades an attempt against the answer key.
///
/// Unanswered questions count as incorrect. Sheet entries for ids not in
/// `questions` are ignored. The percentage is rounded half-up in integer
/// arithmetic; a zero-question exam scores 0, never passes, and is flagged
/// degenerate instead of dividing by zero.
#[must_use]
pub fn grade(questions: &[Question], answers: &AnswerSheet, pass_threshold: u8) -> ExamOutcome {
    let total = questions.len();
    if total == 0 {
        return ExamOutcome::from_counts(0, 0, 0, 0, false);
    }

    let mut correct = 0_usize;
    let mut unanswered = 0_usize;
    for question in questions {
        match answers.selected(question.id()) {
            Some(choice) if question.is_correct(choice) => correct += 1,
            Some(_) => {}
            None => unanswered += 1,
        }
    }

    let score_percent = percent_half_up(correct, total);
    let passed = score_percent >= pass_threshold;

    ExamOutcome::from_counts(total, correct, unanswered, score_percent, passed)
}

/// `round(correct / total * 100)` with exact halves rounding up.
///
/// `total` must be non-zero.
fn percent_half_up(correct: usize, total: usize) -> u8 {
    let percent = (200 * correct + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionId;

    fn question(id: u64, correct_index: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index,
            None,
        )
        .unwrap()
    }

    #[test]
    fn grade_counts_unanswered_as_incorrect() {
        // 10 questions: 6 correct, 2 wrong, 2 unanswered.
        let questions: Vec<_> = (1..=10).map(|id| question(id, 0)).collect();
        let mut answers = AnswerSheet::new();
        for id in 1..=6 {
            answers.select(QuestionId::new(id), 0);
        }
        for id in 7..=8 {
            answers.select(QuestionId::new(id), 1);
        }

        let outcome = grade(&questions, &answers, 60);

        assert_eq!(outcome.total(), 10);
        assert_eq!(outcome.correct(), 6);
        assert_eq!(outcome.incorrect(), 4);
        assert_eq!(outcome.unanswered(), 2);
        assert_eq!(outcome.score_percent(), 60);
        assert!(outcome.passed());
    }

    #[test]
    fn grade_zero_questions_is_degenerate() {
        let outcome = grade(&[], &AnswerSheet::new(), 60);

        assert_eq!(outcome.total(), 0);
        assert_eq!(outcome.score_percent(), 0);
        assert!(!outcome.passed());
        assert!(outcome.is_degenerate());
    }

    #[test]
    fn grade_rounds_halves_up() {
        // 29/40 = 72.5% -> 73.
        let questions: Vec<_> = (1..=40).map(|id| question(id, 0)).collect();
        let mut answers = AnswerSheet::new();
        for id in 1..=29 {
            answers.select(QuestionId::new(id), 0);
        }

        let outcome = grade(&questions, &answers, 60);
        assert_eq!(outcome.score_percent(), 73);
    }

    #[test]
    fn grade_ignores_unknown_question_ids() {
        let questions = vec![question(1, 0), question(2, 1)];
        let mut answers = AnswerSheet::new();
        answers.select(QuestionId::new(1), 0);
        answers.select(QuestionId::new(99), 0);

        let outcome = grade(&questions, &answers, 60);
        assert_eq!(outcome.correct(), 1);
        assert_eq!(outcome.unanswered(), 1);
    }

    #[test]
    fn grade_perfect_score_passes_any_threshold() {
        let questions = vec![question(1, 2), question(2, 3)];
        let mut answers = AnswerSheet::new();
        answers.select(QuestionId::new(1), 2);
        answers.select(QuestionId::new(2), 3);

        let outcome = grade(&questions, &answers, 100);
        assert_eq!(outcome.score_percent(), 100);
        assert!(outcome.passed());
    }

    #[test]
    fn grade_zero_threshold_passes_empty_sheet() {
        let questions = vec![question(1, 0)];
        let outcome = grade(&questions, &AnswerSheet::new(), 0);
        assert_eq!(outcome.score_percent(), 0);
        assert!(outcome.passed());
    }
}
