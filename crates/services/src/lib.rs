#![forbid(unsafe_code)]

pub mod analytics;
pub mod error;
pub mod exam;
pub mod notifications;
pub mod source;
pub mod timer;

pub use exam_core::Clock;

pub use analytics::{
    AnalyticsConfig, AnalyticsEvent, AnalyticsSink, HttpAnalyticsSink, NoopAnalyticsSink,
};
pub use error::{AnalyticsError, SessionError, SourceError};
pub use exam::{
    ExamHandle, ExamLoopService, ExamProgress, ExamSession, ExamSnapshot, Navigator, QuestionView,
};
pub use notifications::NotificationQueue;
pub use source::{InMemoryQuestionBank, QuestionSource};
pub use timer::{CountdownTimer, TimerEvent, TimerEventKind};
