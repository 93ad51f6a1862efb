//! Generator roster import from parallel name and CPF lists.

use tracing::info;

use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{Employee, tax_id};

/// Builds a roster from one name per line and one CPF per line.
///
/// Names are trimmed; CPFs are cleaned to digits. Blank entries are
/// dropped from each list before pairing.
///
/// # Errors
///
/// - `MissingNamesOrTaxIds` if either list is blank
/// - `NameTaxIdCountMismatch` if the lists differ in length
/// - `InvalidTaxIds` listing every CPF that fails validation
pub fn import_roster(names: &str, tax_ids: &str) -> ToolkitResult<Vec<Employee>> {
    if names.trim().is_empty() || tax_ids.trim().is_empty() {
        return Err(ToolkitError::MissingNamesOrTaxIds);
    }

    let names: Vec<&str> = names
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    let cpfs: Vec<String> = tax_ids
        .lines()
        .map(tax_id::clean)
        .filter(|cpf| !cpf.is_empty())
        .collect();

    if names.len() != cpfs.len() {
        return Err(ToolkitError::NameTaxIdCountMismatch {
            names: names.len(),
            tax_ids: cpfs.len(),
        });
    }

    let invalid: Vec<String> = cpfs
        .iter()
        .filter(|cpf| !tax_id::is_valid(cpf))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(ToolkitError::InvalidTaxIds { values: invalid });
    }

    let roster: Vec<Employee> = names
        .into_iter()
        .zip(cpfs)
        .map(|(name, cpf)| Employee::new(name, cpf))
        .collect();

    info!(employees = roster.len(), "Imported generator roster");
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_pairs_lines() {
        let roster = import_roster("Ana\n\nBia\n", "529.982.247-25\n111.444.777-35").unwrap();
        assert_eq!(
            roster,
            vec![
                Employee::new("Ana", "52998224725"),
                Employee::new("Bia", "11144477735"),
            ]
        );
    }

    #[test]
    fn test_import_requires_both_lists() {
        assert!(matches!(
            import_roster("Ana", "   "),
            Err(ToolkitError::MissingNamesOrTaxIds)
        ));
    }

    #[test]
    fn test_import_count_mismatch() {
        let result = import_roster("Ana\nBia", "52998224725");
        assert!(matches!(
            result,
            Err(ToolkitError::NameTaxIdCountMismatch { names: 2, tax_ids: 1 })
        ));
    }

    #[test]
    fn test_import_reports_cleaned_invalid_cpfs() {
        match import_roster("Ana\nBia", "529.982.247-25\n123.456.789-01") {
            Err(ToolkitError::InvalidTaxIds { values }) => {
                assert_eq!(values, vec!["12345678901"]);
            }
            other => panic!("Expected InvalidTaxIds, got {:?}", other),
        }
    }
}
