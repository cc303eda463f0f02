mod answer;
mod ids;
mod notification;
mod outcome;
mod question;
mod settings;

pub use answer::AnswerSheet;
pub use ids::{AttemptId, ExamId, NotificationId, ParseIdError, QuestionId};
pub use notification::{Notification, Severity};
pub use outcome::{ExamOutcome, FinishReason, Mode};
pub use question::{Question, QuestionError};
pub use settings::{ExamSettings, SettingsError};
