//! Configuration types for the REP-P toolkit.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section falls
//! back to the built-in defaults when omitted.

use serde::{Deserialize, Serialize};

/// The semantic role a roster column or XML tag carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterField {
    /// The employee's name.
    Name,
    /// The employee's tax id.
    TaxId,
}

impl RosterField {
    /// All roles a roster table must cover.
    pub const ALL: [RosterField; 2] = [RosterField::Name, RosterField::TaxId];
}

/// A role together with the substrings that identify it.
///
/// A label carries the role when its lower-cased form contains any of the
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCandidates {
    /// The role identified by the candidates.
    pub role: RosterField,
    /// Lower-case substrings, tried in order.
    pub candidates: Vec<String>,
}

impl RoleCandidates {
    /// Creates an entry from string literals.
    pub fn new(role: RosterField, candidates: &[&str]) -> Self {
        Self {
            role,
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Vocabularies used to recognise roster columns and tags.
///
/// Tables are ordered: when a label matches several roles, the first entry
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterVocabulary {
    /// Header-cell vocabulary for CSV rosters.
    pub csv_columns: Vec<RoleCandidates>,
    /// Element-name vocabulary for XML rosters.
    pub xml_tags: Vec<RoleCandidates>,
}

impl Default for RosterVocabulary {
    fn default() -> Self {
        Self {
            csv_columns: vec![
                RoleCandidates::new(RosterField::Name, &["nome", "name", "funcionario"]),
                RoleCandidates::new(RosterField::TaxId, &["cpf", "documento", "doc"]),
            ],
            xml_tags: vec![
                RoleCandidates::new(
                    RosterField::Name,
                    &["nome", "name", "funcionario", "employee", "pessoa"],
                ),
                RoleCandidates::new(RosterField::TaxId, &["cpf", "documento", "doc", "document"]),
            ],
        }
    }
}

/// Settings for punch-record exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Label rendered in place of the name of an unlinked record.
    pub unlinked_label: String,
    /// File name (without extension) suggested to the download sink.
    pub base_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            unlinked_label: "Não vinculado".to_string(),
            base_filename: "registros_ponto".to_string(),
        }
    }
}

/// Settings for enrollment JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentConfig {
    /// File name (without extension) suggested to the download sink.
    pub base_filename: String,
}

impl Default for EnrollmentConfig {
    fn default() -> Self {
        Self {
            base_filename: "funcionarios".to_string(),
        }
    }
}

/// Settings for generated punch-record blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// File name (without extension) suggested to the download sink.
    pub base_filename: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_filename: "registros_gerados".to_string(),
        }
    }
}

/// The complete toolkit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Roster recognition vocabularies.
    pub roster: RosterVocabulary,
    /// Export settings.
    pub export: ExportConfig,
    /// Enrollment output settings.
    pub enrollment: EnrollmentConfig,
    /// Generator output settings.
    pub generator: GeneratorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_csv_vocabulary_puts_name_first() {
        let vocabulary = RosterVocabulary::default();
        assert_eq!(vocabulary.csv_columns[0].role, RosterField::Name);
        assert_eq!(vocabulary.csv_columns[1].role, RosterField::TaxId);
        assert!(vocabulary.xml_tags[1].candidates.contains(&"document".to_string()));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "export:\n  unlinked_label: Unlinked\n";
        let config: ToolkitConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.export.unlinked_label, "Unlinked");
        assert_eq!(config.export.base_filename, "registros_ponto");
        assert_eq!(config.roster, RosterVocabulary::default());
    }

    #[test]
    fn test_roster_field_yaml_names() {
        let yaml = "role: tax_id\ncandidates: [cpf]\n";
        let entry: RoleCandidates = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry, RoleCandidates::new(RosterField::TaxId, &["cpf"]));
    }
}
