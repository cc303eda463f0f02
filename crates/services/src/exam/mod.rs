mod navigator;
mod progress;
mod session;
mod view;
mod workflow;

// Public API of the exam subsystem.
pub use crate::error::SessionError;
pub use navigator::Navigator;
pub use progress::ExamProgress;
pub use session::ExamSession;
pub use view::{ExamSnapshot, QuestionView};
pub use workflow::{ExamHandle, ExamLoopService};
