//! Asynchronous input loading with stale-completion detection.
//!
//! A load is two-phase: the session hands out a [`LoadTicket`] when the load
//! begins, the file is read without holding the session, and the ticket is
//! presented when the content is committed. Only the newest ticket for a
//! collection may commit; older ones are discarded.

use std::path::Path;

use tracing::debug;

use crate::error::{ToolkitError, ToolkitResult};

/// Which collection a load replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    /// The punch-record working set.
    Records,
    /// The employee roster used for linking.
    Roster,
}

/// Proof that a load was begun, tagged with its generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    /// The collection being loaded.
    pub target: LoadTarget,
    /// Monotonic per-collection generation.
    pub generation: u64,
}

/// Per-collection generation counters.
#[derive(Debug, Clone, Default)]
pub struct LoadGenerations {
    records: u64,
    roster: u64,
}

impl LoadGenerations {
    fn counter(&mut self, target: LoadTarget) -> &mut u64 {
        match target {
            LoadTarget::Records => &mut self.records,
            LoadTarget::Roster => &mut self.roster,
        }
    }

    /// Starts a new load of `target`, superseding any in flight.
    pub fn begin(&mut self, target: LoadTarget) -> LoadTicket {
        let counter = self.counter(target);
        *counter += 1;
        debug!(target = ?target, generation = *counter, "Load started");
        LoadTicket {
            target,
            generation: *counter,
        }
    }

    /// The newest generation issued for `target`.
    pub fn current(&self, target: LoadTarget) -> u64 {
        match target {
            LoadTarget::Records => self.records,
            LoadTarget::Roster => self.roster,
        }
    }

    /// Checks that `ticket` is still the newest load for its collection.
    pub fn check(&self, ticket: LoadTicket) -> ToolkitResult<()> {
        let current = self.current(ticket.target);
        if ticket.generation == current {
            Ok(())
        } else {
            Err(ToolkitError::StaleLoad {
                generation: ticket.generation,
                current,
            })
        }
    }
}

/// A fully buffered input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Decoded file content.
    pub text: String,
    /// Lower-case extension without the dot, empty if none.
    pub extension: String,
}

impl InputFile {
    /// Wraps text already in memory.
    pub fn new(text: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extension: extension.into().to_lowercase(),
        }
    }
}

/// Reads the whole file at `path` as text.
///
/// Bytes that are not valid UTF-8 (e.g. Latin-1 spreadsheet exports) are
/// replaced with U+FFFD instead of failing the load.
pub async fn read_input(path: impl AsRef<Path>) -> ToolkitResult<InputFile> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| ToolkitError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    debug!(path = %path.display(), bytes = bytes.len(), "Read input file");
    Ok(InputFile::new(text, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_is_current() {
        let mut generations = LoadGenerations::default();
        let first = generations.begin(LoadTarget::Records);
        let second = generations.begin(LoadTarget::Records);

        assert!(generations.check(second).is_ok());
        assert!(matches!(
            generations.check(first),
            Err(ToolkitError::StaleLoad { generation: 1, current: 2 })
        ));
    }

    #[test]
    fn test_collections_have_independent_generations() {
        let mut generations = LoadGenerations::default();
        let records = generations.begin(LoadTarget::Records);
        generations.begin(LoadTarget::Roster);

        assert!(generations.check(records).is_ok());
    }

    #[tokio::test]
    async fn test_read_input_records_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Funcionarios.CSV");
        std::fs::write(&path, "nome;cpf\n").unwrap();

        let input = read_input(&path).await.unwrap();

        assert_eq!(input.text, "nome;cpf\n");
        assert_eq!(input.extension, "csv");
    }

    #[tokio::test]
    async fn test_read_input_decodes_latin1_bytes_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funcionarios.csv");
        std::fs::write(&path, b"nome;cpf\nJos\xE9;52998224725\n").unwrap();

        let input = read_input(&path).await.unwrap();

        assert_eq!(input.text, "nome;cpf\nJos\u{FFFD};52998224725\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let result = read_input("/nonexistent/registros.txt").await;
        assert!(matches!(result, Err(ToolkitError::Io { .. })));
    }
}
