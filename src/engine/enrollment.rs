//! Enrollment JSON assembly from parallel line lists.
//!
//! Name, tax id and registration number are required and must have the same
//! number of non-blank lines. Badge, password and biometric lines are
//! optional and positional: line `i` belongs to employee `i`, and a blank or
//! missing line omits the field for that employee.

use tracing::info;

use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{EnrollmentEntity, tax_id};

/// Raw text of each enrollment column, one value per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrollmentInput<'a> {
    /// Employee names.
    pub names: &'a str,
    /// Tax ids, masked or not.
    pub tax_ids: &'a str,
    /// Registration numbers.
    pub registrations: &'a str,
    /// Badge card data.
    pub badges: &'a str,
    /// Time-clock passwords.
    pub passwords: &'a str,
    /// Biometric templates.
    pub biometrics: &'a str,
}

/// Trimmed, non-blank lines of a required column.
fn required_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

/// Trimmed lines of an optional column, blank lines kept as `None`.
fn optional_lines(text: &str) -> Vec<Option<&str>> {
    text.lines()
        .map(str::trim)
        .map(|line| (!line.is_empty()).then_some(line))
        .collect()
}

fn optional_at(lines: &[Option<&str>], index: usize) -> Option<String> {
    lines.get(index).copied().flatten().map(str::to_string)
}

/// Builds enrollment entities, all or nothing.
///
/// # Errors
///
/// - `MissingRequiredFields` if a required column has no lines
/// - `RequiredFieldCountMismatch` if the required columns differ in length
/// - `InvalidTaxIds` listing every tax id that fails validation
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::engine::{EnrollmentInput, assemble_enrollment};
///
/// let entities = assemble_enrollment(&EnrollmentInput {
///     names: "Ana\nBia",
///     tax_ids: "529.982.247-25\n111.444.777-35",
///     registrations: "001\n002",
///     badges: "A1",
///     ..Default::default()
/// })
/// .unwrap();
///
/// assert_eq!(entities[0].mifare_dado.as_deref(), Some("A1"));
/// assert!(entities[1].mifare_dado.is_none());
/// assert_eq!(entities[1].cpf, "11144477735");
/// ```
pub fn assemble_enrollment(input: &EnrollmentInput<'_>) -> ToolkitResult<Vec<EnrollmentEntity>> {
    let names = required_lines(input.names);
    let tax_ids = required_lines(input.tax_ids);
    let registrations = required_lines(input.registrations);

    if names.is_empty() || tax_ids.is_empty() || registrations.is_empty() {
        return Err(ToolkitError::MissingRequiredFields);
    }

    if names.len() != tax_ids.len() || names.len() != registrations.len() {
        return Err(ToolkitError::RequiredFieldCountMismatch {
            names: names.len(),
            tax_ids: tax_ids.len(),
            registrations: registrations.len(),
        });
    }

    let invalid: Vec<String> = tax_ids
        .iter()
        .filter(|raw| !tax_id::is_valid(raw))
        .map(|raw| raw.to_string())
        .collect();
    if !invalid.is_empty() {
        return Err(ToolkitError::InvalidTaxIds { values: invalid });
    }

    let badges = optional_lines(input.badges);
    let passwords = optional_lines(input.passwords);
    let biometrics = optional_lines(input.biometrics);

    let entities: Vec<EnrollmentEntity> = names
        .iter()
        .zip(&tax_ids)
        .zip(&registrations)
        .enumerate()
        .map(|(index, ((name, cpf), registration))| EnrollmentEntity {
            nome: name.to_string(),
            cpf: tax_id::clean(cpf),
            matricula: registration.to_string(),
            mifare_dado: optional_at(&badges, index),
            senha: optional_at(&passwords, index),
            bio_dados: optional_at(&biometrics, index),
        })
        .collect();

    info!(employees = entities.len(), "Assembled enrollment entities");
    Ok(entities)
}

/// Serializes entities as a pretty-printed JSON array.
pub fn enrollment_json(entities: &[EnrollmentEntity]) -> ToolkitResult<String> {
    serde_json::to_string_pretty(entities).map_err(|e| ToolkitError::Serialization {
        message: e.to_string(),
    })
}
