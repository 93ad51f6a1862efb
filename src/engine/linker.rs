//! Linking punch records to roster employees.
//!
//! A record links to the first roster employee, in roster order, whose tax id
//! equals the record's tax id or whose normalized name equals the normalized
//! name already attached to the record. The name branch only applies to
//! records that carry a name, i.e. records linked by an earlier run; freshly
//! parsed records link by tax id alone.

use std::collections::HashMap;

use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::models::{Employee, PunchRecord};

/// Outcome of a linking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Records that matched an employee in this run.
    pub linked: usize,
    /// Matched records that had no name before this run.
    pub newly_linked: usize,
    /// Records left without a match.
    pub unmatched: usize,
}

/// Lower-cases, strips combining diacritics (U+0300..U+036F) and trims.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::engine::normalize_name;
///
/// assert_eq!(normalize_name("  JOSÉ  "), "jose");
/// assert_eq!(normalize_name("Conceição"), "conceicao");
/// ```
pub fn normalize_name(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lookup over a roster preserving first-match-in-roster-order semantics.
#[derive(Debug)]
pub struct EmployeeIndex<'a> {
    employees: &'a [Employee],
    by_tax_id: HashMap<&'a str, usize>,
    by_name: HashMap<String, usize>,
}

impl<'a> EmployeeIndex<'a> {
    /// Indexes `employees`; duplicate keys keep their first position.
    pub fn new(employees: &'a [Employee]) -> Self {
        let mut by_tax_id = HashMap::new();
        let mut by_name = HashMap::new();
        for (position, employee) in employees.iter().enumerate() {
            by_tax_id.entry(employee.tax_id.as_str()).or_insert(position);
            by_name.entry(normalize_name(&employee.name)).or_insert(position);
        }
        Self {
            employees,
            by_tax_id,
            by_name,
        }
    }

    /// Returns the first employee matching `record` by tax id or name.
    pub fn find(&self, record: &PunchRecord) -> Option<&'a Employee> {
        let by_tax_id = self.by_tax_id.get(record.tax_id.as_str()).copied();
        let by_name = record
            .employee_name
            .as_deref()
            .and_then(|name| self.by_name.get(&normalize_name(name)).copied());

        let position = match (by_tax_id, by_name) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        position.map(|p| &self.employees[p])
    }
}

/// Attaches employee names to `records`.
///
/// Matched records receive the employee's name; unmatched records keep
/// whatever name they had. Re-running with the same inputs yields the same
/// names.
pub fn link(records: &mut [PunchRecord], employees: &[Employee]) -> LinkReport {
    let index = EmployeeIndex::new(employees);
    let mut report = LinkReport::default();

    for record in records.iter_mut() {
        match index.find(record) {
            Some(employee) => {
                if record.employee_name.is_none() {
                    report.newly_linked += 1;
                }
                record.employee_name = Some(employee.name.clone());
                report.linked += 1;
            }
            None => report.unmatched += 1,
        }
    }

    info!(
        linked = report.linked,
        newly_linked = report.newly_linked,
        unmatched = report.unmatched,
        "Linked punch records"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tax_id: &str) -> PunchRecord {
        PunchRecord::new(tax_id, "2024-03-10", "08:15")
    }

    #[test]
    fn test_links_by_tax_id() {
        let employees = vec![Employee::new("Ana Silva", "11111111111")];
        let mut records = vec![record("11111111111")];

        let report = link(&mut records, &employees);

        assert_eq!(records[0].employee_name.as_deref(), Some("Ana Silva"));
        assert_eq!(report.linked, 1);
        assert_eq!(report.newly_linked, 1);
        assert_eq!(report.unmatched, 0);
    }

    #[test]
    fn test_unmatched_record_stays_unlinked() {
        let employees = vec![Employee::new("Ana Silva", "11111111111")];
        let mut records = vec![record("22222222222")];

        let report = link(&mut records, &employees);

        assert!(records[0].employee_name.is_none());
        assert_eq!(report, LinkReport { linked: 0, newly_linked: 0, unmatched: 1 });
    }

    #[test]
    fn test_normalization_folds_case_accents_and_spaces() {
        assert_eq!(normalize_name("José"), normalize_name("jose"));
        assert_eq!(normalize_name("José"), normalize_name("JOSÉ  "));
        assert_ne!(normalize_name("José"), normalize_name("Josué"));
    }

    #[test]
    fn test_named_record_relinks_by_normalized_name() {
        let employees = vec![
            Employee::new("Bia", "33333333333"),
            Employee::new("José", "44444444444"),
        ];
        let mut named = record("99999999999");
        named.employee_name = Some("JOSÉ  ".to_string());
        let mut records = vec![named];

        let report = link(&mut records, &employees);

        assert_eq!(records[0].employee_name.as_deref(), Some("José"));
        assert_eq!(report.linked, 1);
        assert_eq!(report.newly_linked, 0);
    }

    #[test]
    fn test_first_roster_match_wins_across_branches() {
        // Employee 0 matches by name, employee 1 by tax id: roster order decides.
        let employees = vec![
            Employee::new("Ana", "55555555555"),
            Employee::new("Outra Ana", "66666666666"),
        ];
        let mut named = record("66666666666");
        named.employee_name = Some("ana".to_string());
        let mut records = vec![named];

        link(&mut records, &employees);

        assert_eq!(records[0].employee_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_duplicate_tax_ids_resolve_to_first_employee() {
        let employees = vec![
            Employee::new("Primeira", "77777777777"),
            Employee::new("Segunda", "77777777777"),
        ];
        let mut records = vec![record("77777777777")];

        link(&mut records, &employees);

        assert_eq!(records[0].employee_name.as_deref(), Some("Primeira"));
    }

    #[test]
    fn test_linking_twice_is_stable() {
        let employees = vec![Employee::new("Ana Silva", "11111111111")];
        let mut records = vec![record("11111111111"), record("22222222222")];

        link(&mut records, &employees);
        let first = records.clone();
        let report = link(&mut records, &employees);

        assert_eq!(records, first);
        assert_eq!(report.linked, 1);
        assert_eq!(report.newly_linked, 0);
    }
}
