//! Role resolution over ordered `(role, candidate substrings)` tables.
//!
//! Roster headers and XML element names are free text. These functions map
//! them onto typed [`RosterField`] roles using the configured vocabulary.

use crate::config::{RoleCandidates, RosterField};

/// Column positions of the roles a CSV roster needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the name column.
    pub name: usize,
    /// Index of the tax-id column.
    pub tax_id: usize,
}

impl ColumnMap {
    /// The highest index a data row must reach to carry both fields.
    pub fn max_index(&self) -> usize {
        self.name.max(self.tax_id)
    }
}

/// Returns true if `label` contains any candidate of `entry`.
fn matches(label: &str, entry: &RoleCandidates) -> bool {
    entry
        .candidates
        .iter()
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| label.contains(&candidate.to_lowercase()))
}

/// Returns the first role in `table` whose candidates appear in `label`.
///
/// Matching is case-insensitive substring matching.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::codec::resolve_role;
/// use rep_p_toolkit::config::{RosterField, RosterVocabulary};
///
/// let table = RosterVocabulary::default().xml_tags;
/// assert_eq!(resolve_role("NomeCompleto", &table), Some(RosterField::Name));
/// assert_eq!(resolve_role("numeroDocumento", &table), Some(RosterField::TaxId));
/// assert_eq!(resolve_role("setor", &table), None);
/// ```
pub fn resolve_role(label: &str, table: &[RoleCandidates]) -> Option<RosterField> {
    let label = label.to_lowercase();
    table
        .iter()
        .find(|entry| matches(&label, entry))
        .map(|entry| entry.role)
}

/// Returns the index of the first label, left to right, carrying `role`.
pub fn column_index(labels: &[String], role: RosterField, table: &[RoleCandidates]) -> Option<usize> {
    labels.iter().position(|label| {
        let label = label.to_lowercase();
        table
            .iter()
            .filter(|entry| entry.role == role)
            .any(|entry| matches(&label, entry))
    })
}

/// Locates the name and tax-id columns in a header row.
///
/// Each role is located independently, so one column may satisfy both.
/// Returns `None` when either role has no matching column.
pub fn locate_columns(labels: &[String], table: &[RoleCandidates]) -> Option<ColumnMap> {
    Some(ColumnMap {
        name: column_index(labels, RosterField::Name, table)?,
        tax_id: column_index(labels, RosterField::TaxId, table)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterVocabulary;

    fn labels(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_locates_semicolon_header_columns() {
        let table = RosterVocabulary::default().csv_columns;
        let map = locate_columns(&labels(&["nome", "cpf", "setor"]), &table).unwrap();

        assert_eq!(map, ColumnMap { name: 0, tax_id: 1 });
        assert_eq!(map.max_index(), 1);
    }

    #[test]
    fn test_first_matching_column_wins() {
        let table = RosterVocabulary::default().csv_columns;
        let map = locate_columns(
            &labels(&["matricula", "Nome Social", "nome", "Documento", "cpf"]),
            &table,
        )
        .unwrap();

        assert_eq!(map.name, 1);
        assert_eq!(map.tax_id, 3);
    }

    #[test]
    fn test_missing_role_yields_none() {
        let table = RosterVocabulary::default().csv_columns;
        assert_eq!(locate_columns(&labels(&["nome", "setor"]), &table), None);
        assert_eq!(locate_columns(&labels(&[]), &table), None);
    }

    #[test]
    fn test_earlier_table_entry_wins_for_ambiguous_labels() {
        let table = RosterVocabulary::default().xml_tags;
        // "nome_documento" carries both vocabularies; name is listed first.
        assert_eq!(resolve_role("nome_documento", &table), Some(RosterField::Name));
    }

    #[test]
    fn test_empty_candidates_never_match() {
        let table = vec![RoleCandidates::new(RosterField::Name, &[""])];
        assert_eq!(resolve_role("anything", &table), None);
    }
}
