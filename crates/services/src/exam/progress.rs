/// Aggregated view of answer progress, useful for a question grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamProgress {
    pub total: usize,
    pub answered: usize,
    pub unanswered: usize,
    pub is_complete: bool,
}
