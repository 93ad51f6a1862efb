//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the toolkit
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ToolkitError, ToolkitResult};

use super::types::{RoleCandidates, RosterField, ToolkitConfig};

/// Loads and provides access to the toolkit configuration.
///
/// # Example
///
/// ```no_run
/// use rep_p_toolkit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/toolkit.yaml")?;
/// println!("Unlinked label: {}", loader.config().export.unlinked_label);
/// # Ok::<(), rep_p_toolkit::error::ToolkitError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ToolkitConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML
    /// - A roster vocabulary lacks a role or has an empty candidate list
    pub fn load<P: AsRef<Path>>(path: P) -> ToolkitResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ToolkitError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::from_yaml(&content).map_err(|e| match e {
            ToolkitError::ConfigParseError { message, .. } => ToolkitError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, "Loaded toolkit configuration");
        Ok(config)
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml(content: &str) -> ToolkitResult<Self> {
        let config: ToolkitConfig =
            serde_yaml::from_str(content).map_err(|e| ToolkitError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::validate_table("roster.csv_columns", &config.roster.csv_columns)?;
        Self::validate_table("roster.xml_tags", &config.roster.xml_tags)?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: ToolkitConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ToolkitConfig {
        self.config
    }

    fn validate_table(name: &str, table: &[RoleCandidates]) -> ToolkitResult<()> {
        for role in RosterField::ALL {
            let covered = table
                .iter()
                .any(|entry| entry.role == role && entry.candidates.iter().any(|c| !c.is_empty()));
            if !covered {
                return Err(ToolkitError::ConfigInvalid {
                    message: format!("{} has no candidates for role {:?}", name, role),
                });
            }
        }
        Ok(())
    }
}
