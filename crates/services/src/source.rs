use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use exam_core::model::{ExamId, Question};

use crate::error::SourceError;

/// Boundary to whatever provides the immutable question sequence for an exam.
///
/// Implementations fetch by exam id; the engine never mutates questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Load the ordered questions for the given exam.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` for an unknown exam id, or
    /// `SourceError::Unavailable` when the backing source cannot be reached.
    async fn load_questions(&self, exam_id: ExamId) -> Result<Vec<Question>, SourceError>;
}

/// Simple in-memory question bank for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryQuestionBank {
    exams: Arc<Mutex<HashMap<ExamId, Vec<Question>>>>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self {
            exams: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Registers (or replaces) the question set for an exam.
    pub fn insert_exam(&self, exam_id: ExamId, questions: Vec<Question>) {
        if let Ok(mut guard) = self.exams.lock() {
            guard.insert(exam_id, questions);
        }
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionBank {
    async fn load_questions(&self, exam_id: ExamId) -> Result<Vec<Question>, SourceError> {
        let guard = self
            .exams
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        guard.get(&exam_id).cloned().ok_or(SourceError::NotFound)
    }
}
