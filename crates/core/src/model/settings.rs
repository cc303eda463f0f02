use thiserror::Error;

use crate::model::notification::Severity;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("exam duration must be > 0 seconds")]
    InvalidDuration,

    #[error("pass threshold must be between 0 and 100")]
    InvalidPassThreshold,

    #[error("dismiss delay must be between 1 and 60 seconds")]
    InvalidDismissDelay,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration for one exam session.
///
/// Controls the countdown length, the pass mark, toast auto-dismiss delays,
/// question shuffling, and whether the session opens directly in exam mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSettings {
    duration_secs: u32,
    pass_threshold: u8,
    success_dismiss_secs: u32,
    info_dismiss_secs: u32,
    error_dismiss_secs: u32,
    shuffle_questions: bool,
    starts_in_exam_mode: bool,
}

impl ExamSettings {
    /// Creates default settings: a 30-minute countdown, 60% pass mark,
    /// 3s/3s/4s toast delays, no shuffling, opening in practice mode.
    #[must_use]
    pub fn default_exam() -> Self {
        Self {
            duration_secs: 1_800,
            pass_threshold: 60,
            success_dismiss_secs: 3,
            info_dismiss_secs: 3,
            error_dismiss_secs: 4,
            shuffle_questions: false,
            starts_in_exam_mode: false,
        }
    }

    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns error if the duration is zero, the pass threshold exceeds 100,
    /// or any dismiss delay falls outside 1..=60 seconds.
    pub fn new(
        duration_secs: u32,
        pass_threshold: u8,
        success_dismiss_secs: u32,
        info_dismiss_secs: u32,
        error_dismiss_secs: u32,
        shuffle_questions: bool,
        starts_in_exam_mode: bool,
    ) -> Result<Self, SettingsError> {
        if duration_secs == 0 {
            return Err(SettingsError::InvalidDuration);
        }
        if pass_threshold > 100 {
            return Err(SettingsError::InvalidPassThreshold);
        }
        for delay in [success_dismiss_secs, info_dismiss_secs, error_dismiss_secs] {
            if !(1..=60).contains(&delay) {
                return Err(SettingsError::InvalidDismissDelay);
            }
        }

        Ok(Self {
            duration_secs,
            pass_threshold,
            success_dismiss_secs,
            info_dismiss_secs,
            error_dismiss_secs,
            shuffle_questions,
            starts_in_exam_mode,
        })
    }

    /// Returns a copy with a different countdown length.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidDuration` if `duration_secs` is zero.
    pub fn with_duration_secs(mut self, duration_secs: u32) -> Result<Self, SettingsError> {
        if duration_secs == 0 {
            return Err(SettingsError::InvalidDuration);
        }
        self.duration_secs = duration_secs;
        Ok(self)
    }

    /// Returns a copy with a different pass mark.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidPassThreshold` if above 100.
    pub fn with_pass_threshold(mut self, pass_threshold: u8) -> Result<Self, SettingsError> {
        if pass_threshold > 100 {
            return Err(SettingsError::InvalidPassThreshold);
        }
        self.pass_threshold = pass_threshold;
        Ok(self)
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn with_starts_in_exam_mode(mut self, starts_in_exam_mode: bool) -> Self {
        self.starts_in_exam_mode = starts_in_exam_mode;
        self
    }

    // Accessors
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u8 {
        self.pass_threshold
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }

    #[must_use]
    pub fn starts_in_exam_mode(&self) -> bool {
        self.starts_in_exam_mode
    }

    /// Auto-dismiss delay for a toast of the given severity.
    #[must_use]
    pub fn dismiss_delay_secs(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Success => self.success_dismiss_secs,
            Severity::Info => self.info_dismiss_secs,
            Severity::Error => self.error_dismiss_secs,
        }
    }

    #[must_use]
    pub fn dismiss_delay(&self, severity: Severity) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.dismiss_delay_secs(severity)))
    }

    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.duration_secs))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
