//! Notification severities shared by the error type and the sinks.

use serde::{Deserialize, Serialize};

/// How a user-visible message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The operation completed.
    Success,
    /// The operation failed.
    Error,
    /// The operation was skipped because an input was missing.
    Warning,
    /// Informational.
    Info,
}

/// A message handed to a notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The message text.
    pub message: String,
    /// Its severity.
    pub severity: Severity,
}

impl Notification {
    /// Creates a notification.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}
