use std::time::{Duration, Instant};

use thiserror::Error;

use super::form::{render, View};
use crate::state::{JourneyPayload, JourneyState};

/// How long a failure notice stays visible
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// A widget-side tool call that did not produce a payload
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("tool call rejected: {0}")]
    Rejected(String),

    #[error("malformed tool result: {0}")]
    MalformedResult(String),
}

/// Transient, auto-dismissing notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    raised_at: Instant,
    ttl: Duration,
}

impl Notice {
    pub fn is_visible(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < self.ttl
    }
}

/// Render loop state of the journey widget.
///
/// Everything displayed is redrawn from the latest payload. A failed call
/// never replaces the view; it only raises a notice.
#[derive(Debug, Clone)]
pub struct WidgetController {
    payload: Option<JourneyPayload>,
    view: Option<View>,
    notice: Option<Notice>,
    notice_ttl: Duration,
}

impl Default for WidgetController {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetController {
    pub fn new() -> Self {
        Self::with_notice_ttl(NOTICE_TTL)
    }

    pub fn with_notice_ttl(notice_ttl: Duration) -> Self {
        Self {
            payload: None,
            view: None,
            notice: None,
            notice_ttl,
        }
    }

    /// Replace the display with the view for a fresh payload
    pub fn on_tool_result(&mut self, payload: JourneyPayload) -> &View {
        tracing::debug!(step = %payload.step, "rendering journey step");
        self.notice = None;
        let view = self.view.insert(render(&payload));
        self.payload = Some(payload);
        view
    }

    /// Keep the current view and raise a transient notice
    pub fn on_call_failed(&mut self, failure: &TransportFailure, now: Instant) {
        tracing::warn!(error = %failure, "hospital_journey call failed");
        self.notice = Some(Notice {
            message: format!("Could not update the journey: {}", failure),
            raised_at: now,
            ttl: self.notice_ttl,
        });
    }

    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    /// State the current view was rendered from
    pub fn state(&self) -> Option<&JourneyState> {
        self.payload.as_ref().map(|p| &p.state)
    }

    /// The notice, if it has not yet been dismissed
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible(now))
    }
}
