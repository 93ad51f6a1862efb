//! Employee roster parsing from CSV and XML.
//!
//! Both parsers resolve columns and elements through the configured
//! vocabulary tables, clean tax ids to digits, and never fail on individual
//! rows: incomplete rows and elements are skipped. Structural problems (no
//! usable header, malformed XML) fail the whole parse and yield no
//! employees.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::config::{RoleCandidates, RosterField, RosterVocabulary};
use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{Employee, tax_id};

use super::resolver::{locate_columns, resolve_role};

/// Roster source layouts, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    /// Delimited text with a header row.
    Csv,
    /// Any XML document.
    Xml,
}

impl RosterFormat {
    /// Chooses the layout from a file extension hint (case-insensitive).
    pub fn from_extension(extension: &str) -> ToolkitResult<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(RosterFormat::Csv),
            "xml" => Ok(RosterFormat::Xml),
            other => Err(ToolkitError::UnsupportedRosterFormat {
                extension: other.to_string(),
            }),
        }
    }
}

/// Removes double quotes and surrounding whitespace from a cell.
fn clean_cell(cell: &str) -> String {
    cell.replace('"', "").trim().to_string()
}

/// Parses a roster file according to its extension hint.
pub fn parse_roster(
    content: &str,
    extension: &str,
    vocabulary: &RosterVocabulary,
) -> ToolkitResult<Vec<Employee>> {
    match RosterFormat::from_extension(extension)? {
        RosterFormat::Csv => parse_csv(content, &vocabulary.csv_columns),
        RosterFormat::Xml => parse_xml(content, &vocabulary.xml_tags),
    }
}

/// Parses a CSV roster.
///
/// The delimiter is `;` when the first line contains one, `,` otherwise.
/// Rows are split on the delimiter with no quote handling, then every
/// double quote is stripped from each cell.
/// Header cells are matched against `columns` to find the name and tax-id
/// columns. A data row is kept when it reaches both columns and both values
/// are non-empty after cleaning.
///
/// # Errors
///
/// Returns `MissingRosterColumns` if either column cannot be located.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::codec::parse_csv;
/// use rep_p_toolkit::config::RosterVocabulary;
///
/// let csv = "nome;cpf;setor\nAna Silva;529.982.247-25;RH\n";
/// let employees = parse_csv(csv, &RosterVocabulary::default().csv_columns).unwrap();
/// assert_eq!(employees[0].name, "Ana Silva");
/// assert_eq!(employees[0].tax_id, "52998224725");
/// ```
pub fn parse_csv(content: &str, columns: &[RoleCandidates]) -> ToolkitResult<Vec<Employee>> {
    let header_line = content.split('\n').next().unwrap_or_default();
    let delimiter = if header_line.contains(';') { b';' } else { b',' };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut rows = reader.records();

    let header: StringRecord = match rows.next() {
        Some(row) => row.map_err(|e| ToolkitError::CsvParse {
            message: e.to_string(),
        })?,
        None => return Err(ToolkitError::MissingRosterColumns),
    };
    let labels: Vec<String> = header
        .iter()
        .map(|cell| clean_cell(cell).to_lowercase())
        .collect();

    let map = locate_columns(&labels, columns).ok_or(ToolkitError::MissingRosterColumns)?;
    debug!(name = map.name, tax_id = map.tax_id, "Located roster columns");

    let mut employees = Vec::new();
    for row in rows {
        let row = row.map_err(|e| ToolkitError::CsvParse {
            message: e.to_string(),
        })?;
        if row.len() <= map.max_index() {
            continue;
        }

        let name = clean_cell(&row[map.name]);
        let cpf = tax_id::clean(&row[map.tax_id]);
        if !name.is_empty() && !cpf.is_empty() {
            employees.push(Employee::new(name, cpf));
        }
    }

    info!(employees = employees.len(), "Parsed CSV roster");
    Ok(employees)
}

/// A partially captured employee.
#[derive(Default)]
struct PendingEmployee {
    name: Option<String>,
    tax_id: Option<String>,
}

impl PendingEmployee {
    /// Takes the employee out once both fields are present and non-empty.
    fn take_complete(&mut self) -> Option<Employee> {
        let complete = matches!(
            (&self.name, &self.tax_id),
            (Some(name), Some(cpf)) if !name.is_empty() && !cpf.is_empty()
        );
        if !complete {
            return None;
        }
        let pending = std::mem::take(self);
        Some(Employee::new(
            pending.name.unwrap_or_default(),
            pending.tax_id.unwrap_or_default(),
        ))
    }
}

/// Parses an XML roster.
///
/// Every element is visited in document order. An element whose name
/// resolves to a role through `tags` and whose trimmed text content is
/// non-empty fills that role of a pending employee; later values overwrite
/// earlier ones. As soon as both name and tax id are present the employee is
/// emitted and the pending state resets. Nesting is irrelevant.
///
/// # Errors
///
/// Returns `XmlParse` if the document is not well-formed.
pub fn parse_xml(content: &str, tags: &[RoleCandidates]) -> ToolkitResult<Vec<Employee>> {
    let document = roxmltree::Document::parse(content).map_err(|e| ToolkitError::XmlParse {
        message: e.to_string(),
    })?;

    let mut employees = Vec::new();
    let mut pending = PendingEmployee::default();

    for element in document.descendants().filter(|node| node.is_element()) {
        let text: String = element
            .descendants()
            .filter(|node| node.is_text())
            .filter_map(|node| node.text())
            .collect();
        let text = text.trim();

        match resolve_role(element.tag_name().name(), tags) {
            Some(RosterField::Name) if !text.is_empty() => {
                pending.name = Some(text.to_string());
            }
            Some(RosterField::TaxId) if !text.is_empty() => {
                pending.tax_id = Some(tax_id::clean(text));
            }
            _ => {}
        }

        if let Some(employee) = pending.take_complete() {
            employees.push(employee);
        }
    }

    info!(employees = employees.len(), "Parsed XML roster");
    Ok(employees)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_columns() -> Vec<RoleCandidates> {
        RosterVocabulary::default().csv_columns
    }

    fn xml_tags() -> Vec<RoleCandidates> {
        RosterVocabulary::default().xml_tags
    }

    #[test]
    fn test_semicolon_csv_ignores_extra_columns() {
        let csv = "nome;cpf;setor\nAna Silva;529.982.247-25;RH\nJosé Souza;11144477735;TI\n";
        let employees = parse_csv(csv, &csv_columns()).unwrap();

        assert_eq!(
            employees,
            vec![
                Employee::new("Ana Silva", "52998224725"),
                Employee::new("José Souza", "11144477735"),
            ]
        );
    }

    #[test]
    fn test_comma_csv_with_quoted_header() {
        let csv = "\"Matricula\",\"Documento\",\"Nome do Funcionario\"\r\n\"7\",\"390.533.447-05\",\"Carla\"\r\n";
        let employees = parse_csv(csv, &csv_columns()).unwrap();

        assert_eq!(employees, vec![Employee::new("Carla", "39053344705")]);
    }

    #[test]
    fn test_unbalanced_quote_does_not_swallow_later_rows() {
        let csv = "nome;cpf\n\"Ana;52998224725\nBia;11144477735\nCaio;39053344705\n";
        let employees = parse_csv(csv, &csv_columns()).unwrap();

        assert_eq!(
            employees,
            vec![
                Employee::new("Ana", "52998224725"),
                Employee::new("Bia", "11144477735"),
                Employee::new("Caio", "39053344705"),
            ]
        );
    }

    #[test]
    fn test_csv_without_tax_id_column_fails() {
        let result = parse_csv("nome,setor\nAna,RH\n", &csv_columns());
        assert!(matches!(result, Err(ToolkitError::MissingRosterColumns)));
    }

    #[test]
    fn test_empty_csv_fails() {
        assert!(matches!(
            parse_csv("", &csv_columns()),
            Err(ToolkitError::MissingRosterColumns)
        ));
    }

    #[test]
    fn test_short_and_empty_rows_are_skipped() {
        let csv = "setor;nome;cpf\nRH;Ana\n\nTI;;52998224725\nTI;Bruno;sem-digitos\nTI;Caio;111.444.777-35\n";
        let employees = parse_csv(csv, &csv_columns()).unwrap();

        assert_eq!(employees, vec![Employee::new("Caio", "11144477735")]);
    }

    #[test]
    fn test_csv_does_not_validate_checksums() {
        let employees = parse_csv("nome,cpf\nAna,11111111111\n", &csv_columns()).unwrap();
        assert_eq!(employees[0].tax_id, "11111111111");
    }

    #[test]
    fn test_nested_xml_roster() {
        let xml = r#"<?xml version="1.0"?>
<funcionarios>
  <funcionario>
    <nome>Ana Silva</nome>
    <cpf>529.982.247-25</cpf>
  </funcionario>
  <funcionario>
    <nome> José </nome>
    <setor>TI</setor>
    <cpf>11144477735</cpf>
  </funcionario>
</funcionarios>"#;
        let employees = parse_xml(xml, &xml_tags()).unwrap();

        assert_eq!(
            employees,
            vec![
                Employee::new("Ana Silva", "52998224725"),
                Employee::new("José", "11144477735"),
            ]
        );
    }

    #[test]
    fn test_flat_xml_pairs_in_document_order() {
        let xml = "<lista><EmployeeName>Ana</EmployeeName><DocumentNumber>52998224725</DocumentNumber>\
<EmployeeName>Bia</EmployeeName><DocumentNumber>11144477735</DocumentNumber></lista>";
        let employees = parse_xml(xml, &xml_tags()).unwrap();

        assert_eq!(employees.len(), 2);
        assert_eq!(employees[1], Employee::new("Bia", "11144477735"));
    }

    #[test]
    fn test_xml_incomplete_pair_is_not_emitted() {
        let xml = "<root><pessoa><nome>Sem CPF</nome></pessoa></root>";
        assert!(parse_xml(xml, &xml_tags()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_xml_is_reported() {
        let result = parse_xml("<root><nome>Ana</root>", &xml_tags());
        assert!(matches!(result, Err(ToolkitError::XmlParse { .. })));
    }

    #[test]
    fn test_dispatch_by_extension() {
        let vocabulary = RosterVocabulary::default();
        let employees = parse_roster("nome,cpf\nAna,52998224725\n", "CSV", &vocabulary).unwrap();
        assert_eq!(employees.len(), 1);

        let result = parse_roster("", "xlsx", &vocabulary);
        assert!(matches!(
            result,
            Err(ToolkitError::UnsupportedRosterFormat { extension }) if extension == "xlsx"
        ));
    }
}
