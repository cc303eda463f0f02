//! Fire-and-forget analytics boundary.
//!
//! Events are spawned off the command path; failures are logged and
//! swallowed so they can never disturb exam state or scoring.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;

use exam_core::model::{AttemptId, ExamId, FinishReason, Mode};

use crate::error::AnalyticsError;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Session lifecycle events reported to the analytics boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    SessionStarted {
        exam_id: ExamId,
        attempt_id: AttemptId,
        mode: Mode,
        question_count: usize,
        at: DateTime<Utc>,
    },
    SessionReset {
        exam_id: ExamId,
        attempt_id: AttemptId,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        exam_id: ExamId,
        attempt_id: AttemptId,
        reason: FinishReason,
        score_percent: u8,
        passed: bool,
        total: usize,
        correct: usize,
        at: DateTime<Utc>,
    },
}

//
// ─── SINK ──────────────────────────────────────────────────────────────────────
//

/// Destination for analytics events.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError` when delivery fails; callers are expected to
    /// log and drop the error.
    async fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Sink that discards every event. The default when analytics is not wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalyticsSink;

#[async_trait]
impl AnalyticsSink for NoopAnalyticsSink {
    async fn track(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

//
// ─── HTTP SINK ─────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct AnalyticsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl AnalyticsConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let endpoint = env::var("EXAM_ANALYTICS_URL").ok()?;
        if endpoint.trim().is_empty() {
            return None;
        }
        let api_key = env::var("EXAM_ANALYTICS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        Some(Self { endpoint, api_key })
    }
}

/// Sink that POSTs each event as JSON to a collector endpoint.
#[derive(Clone)]
pub struct HttpAnalyticsSink {
    client: Client,
    config: Option<AnalyticsConfig>,
}

impl HttpAnalyticsSink {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(AnalyticsConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<AnalyticsConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl AnalyticsSink for HttpAnalyticsSink {
    async fn track(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        let config = self.config.as_ref().ok_or(AnalyticsError::Disabled)?;

        let mut request = self.client.post(&config.endpoint).json(&event);
        if let Some(api_key) = &config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AnalyticsError::HttpStatus(response.status()));
        }
        Ok(())
    }
}

/// Spawns delivery of one event without waiting for it.
///
/// Must be called from within a tokio runtime. Delivery failures are logged
/// at warn level and dropped.
pub fn track_detached(sink: Arc<dyn AnalyticsSink>, event: AnalyticsEvent) {
    tokio::spawn(async move {
        if let Err(error) = sink.track(event).await {
            tracing::warn!(%error, "analytics event dropped");
        }
    });
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
