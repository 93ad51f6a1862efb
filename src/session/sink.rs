//! Collaborator interfaces the toolkit reports through.
//!
//! The toolkit never displays, persists or copies anything itself. It hands
//! messages to a [`NotificationSink`], finished documents to a
//! [`DownloadSink`] and text to a [`Clipboard`].

use std::future::Future;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{Artifact, Notification, Severity};

/// Receives user-visible messages.
pub trait NotificationSink {
    /// Reports `message` with `severity`.
    fn notify(&self, message: &str, severity: Severity);
}

/// Forwards notifications to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success | Severity::Info => info!(severity = ?severity, "{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications received so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    /// Returns the most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.notifications().pop()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if let Ok(mut list) = self.notifications.lock() {
            list.push(Notification::new(message, severity));
        }
    }
}

/// Receives finished documents.
pub trait DownloadSink {
    /// Persists `artifact`, returning where it went.
    fn deliver(&self, artifact: &Artifact) -> ToolkitResult<PathBuf>;
}

/// Writes artifacts into a directory, appending `_YYYY-MM-DD` to the name.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    directory: PathBuf,
    date: Option<NaiveDate>,
}

impl DirectoryDownloadSink {
    /// Writes into `directory`, stamping files with today's local date.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            date: None,
        }
    }

    /// Stamps files with `date` instead of today.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl DownloadSink for DirectoryDownloadSink {
    fn deliver(&self, artifact: &Artifact) -> ToolkitResult<PathBuf> {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let path = self
            .directory
            .join(artifact.filename_with_suffix(&date.format("%Y-%m-%d").to_string()));

        std::fs::create_dir_all(&self.directory)
            .and_then(|_| std::fs::write(&path, &artifact.content))
            .map_err(|e| ToolkitError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), mime_type = artifact.mime_type, "Delivered artifact");
        Ok(path)
    }
}

/// A platform clipboard.
pub trait Clipboard {
    /// Places `text` on the clipboard.
    fn write_text(&self, text: &str) -> impl Future<Output = ToolkitResult<()>> + Send;
}

/// Copies `text` with `primary`, falling back to `fallback` on failure.
///
/// # Errors
///
/// Returns `ClipboardUnavailable` carrying the fallback's failure when both
/// clipboards fail.
pub async fn copy_with_fallback<P, F>(primary: &P, fallback: &F, text: &str) -> ToolkitResult<()>
where
    P: Clipboard,
    F: Clipboard,
{
    match primary.write_text(text).await {
        Ok(()) => Ok(()),
        Err(primary_error) => {
            warn!(error = %primary_error, "Primary clipboard failed, trying fallback");
            fallback
                .write_text(text)
                .await
                .map_err(|e| ToolkitError::ClipboardUnavailable {
                    message: e.to_string(),
                })
        }
    }
}
