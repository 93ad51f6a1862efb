//! Configuration loading and management for the REP-P toolkit.
//!
//! This module loads the recognition vocabularies and output settings from a
//! YAML file. Every section is optional and falls back to the built-in
//! defaults.
//!
//! # Example
//!
//! ```no_run
//! use rep_p_toolkit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/toolkit.yaml").unwrap();
//! println!("Exporting as: {}", config.config().export.base_filename);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EnrollmentConfig, ExportConfig, GeneratorConfig, RoleCandidates, RosterField,
    RosterVocabulary, ToolkitConfig,
};
