//! Analytics sink contract and built-in sinks.
//!
//! # Invariants
//! - Core never awaits a sink on the state path; events are dispatched on a
//!   spawned task and their result is only logged.
//! - Parameters are primitives; entity content (names, descriptions) is
//!   never sent, only ids and counts.

use async_trait::async_trait;
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Primitive analytics parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyticsValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for AnalyticsValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AnalyticsValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for AnalyticsValue {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for AnalyticsValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for AnalyticsValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for AnalyticsValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

pub type AnalyticsParams = BTreeMap<String, AnalyticsValue>;

/// One named analytics event.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub name: String,
    pub params: AnalyticsParams,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: AnalyticsParams::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<AnalyticsValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Sink backend is not reachable.
    Unavailable(String),
    /// Sink refused the event.
    Rejected(String),
}

impl Display for AnalyticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "analytics unavailable: {message}"),
            Self::Rejected(message) => write!(f, "analytics rejected event: {message}"),
        }
    }
}

impl Error for AnalyticsError {}

/// External analytics collaborator.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Called once during registry init, before any data source opens.
    async fn start(&self) -> Result<(), AnalyticsError> {
        Ok(())
    }

    async fn log_event(&self, name: &str, params: &AnalyticsParams) -> Result<(), AnalyticsError>;
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

#[async_trait]
impl AnalyticsSink for NoopAnalytics {
    async fn log_event(&self, _name: &str, _params: &AnalyticsParams) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Sink that records events through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalytics;

#[async_trait]
impl AnalyticsSink for LogAnalytics {
    async fn log_event(&self, name: &str, params: &AnalyticsParams) -> Result<(), AnalyticsError> {
        let rendered = serde_json::to_string(params)
            .map_err(|err| AnalyticsError::Rejected(err.to_string()))?;
        info!("event=analytics module=analytics status=ok name={name} params={rendered}");
        Ok(())
    }
}

/// Sends `event` to `sink` on a spawned task and forgets about it.
///
/// Must be called from inside a Tokio runtime.
pub fn fire_and_forget(sink: Arc<dyn AnalyticsSink>, event: AnalyticsEvent) {
    tokio::spawn(async move {
        if let Err(err) = sink.log_event(&event.name, &event.params).await {
            warn!(
                "event=analytics_dropped module=analytics status=error name={} error={}",
                event.name, err
            );
        }
    });
}
