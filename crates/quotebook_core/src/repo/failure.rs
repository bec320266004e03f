//! Typed failure taxonomy shared by repositories, use cases and state.
//!
//! # Invariants
//! - `Validation` failures are produced only by the use-case layer.
//! - `Database` failures are produced only at the repository boundary.
//! - `message` is user-presentable and surfaced verbatim by state machines.

use crate::datasource::SourceError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CoreResult<T> = Result<T, Failure>;

/// Failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Input rejected before any storage access.
    Validation,
    /// Referenced id is absent.
    NotFound,
    /// Domain rule violated, e.g. quota exceeded.
    BusinessLogic,
    /// Storage I/O or codec fault.
    Database,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::BusinessLogic => "business_logic",
            Self::Database => "database",
        }
    }
}

/// Failure arm of every core operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound, message)
    }

    pub fn business(message: impl Into<String>) -> Self {
        Self::new(FailureKind::BusinessLogic, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Database, message)
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for Failure {}

impl From<SourceError> for Failure {
    fn from(value: SourceError) -> Self {
        match value {
            SourceError::NotFound { .. } => Self::not_found(value.to_string()),
            other => Self::database(format!("Storage error: {other}")),
        }
    }
}

/// Combinators for composing [`CoreResult`] values.
pub trait CoreResultExt<T> {
    /// Collapses both arms into one value.
    fn fold<U>(self, on_failure: impl FnOnce(Failure) -> U, on_success: impl FnOnce(T) -> U)
        -> U;

    /// Prefixes the failure message with operation context, keeping the kind.
    fn context(self, context: &str) -> CoreResult<T>;
}

impl<T> CoreResultExt<T> for CoreResult<T> {
    fn fold<U>(
        self,
        on_failure: impl FnOnce(Failure) -> U,
        on_success: impl FnOnce(T) -> U,
    ) -> U {
        match self {
            Ok(value) => on_success(value),
            Err(failure) => on_failure(failure),
        }
    }

    fn context(self, context: &str) -> CoreResult<T> {
        self.map_err(|failure| Failure {
            kind: failure.kind,
            message: format!("{context}: {}", failure.message),
        })
    }
}
