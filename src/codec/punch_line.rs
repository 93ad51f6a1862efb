//! The REP-P punch-record line format.
//!
//! A punch line looks like
//! `offl_dh:{hora:HH:MM,data:YYYY-MM-DD},ident_func:<cpf>,nome_func:<name>`.
//! In exported punch files records sit on every other physical line,
//! starting with the first; the lines in between are ignored.
//!
//! Parsing is lenient: a line that does not carry all three of hour, date
//! and tax id is skipped silently and only the aggregate counts are
//! reported.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::models::{Employee, PunchRecord};

static HOUR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"offl_dh:\{hora:(\d{2}:\d{2})").expect("hour pattern is a valid regex")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data:(\d{4}-\d{2}-\d{2})").expect("date pattern is a valid regex")
});

static TAX_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ident_func:(\d{11})").expect("tax id pattern is a valid regex")
});

/// Records per physical line stride: one record line, one ignored line.
const RECORD_LINE_STRIDE: usize = 2;

/// The outcome of parsing a punch file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordParse {
    /// Records in input order, all unlinked.
    pub records: Vec<PunchRecord>,
    /// Number of physical lines examined as record candidates.
    pub candidate_lines: usize,
}

impl RecordParse {
    /// Number of candidate lines that did not yield a record.
    pub fn skipped(&self) -> usize {
        self.candidate_lines - self.records.len()
    }
}

fn capture<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts a record from a single line, if all three fields are present.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::codec::parse_line;
///
/// let record = parse_line("offl_dh:{hora:08:15,data:2024-03-10},ident_func:12345678901,nome_func:X")
///     .unwrap();
/// assert_eq!(record.tax_id, "12345678901");
/// assert_eq!(record.employee_name, None);
///
/// assert!(parse_line("offl_dh:{hora:08:15},ident_func:12345678901").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<PunchRecord> {
    let time = capture(&HOUR_PATTERN, line)?;
    let date = capture(&DATE_PATTERN, line)?;
    let tax_id = capture(&TAX_ID_PATTERN, line)?;
    Some(PunchRecord::new(tax_id, date, time))
}

/// Parses a punch file.
///
/// Only lines 0, 2, 4, ... are considered. The name field is not read; names
/// are attached later by the linker.
pub fn parse_records(text: &str) -> RecordParse {
    let mut parse = RecordParse::default();

    for line in text.split('\n').step_by(RECORD_LINE_STRIDE) {
        parse.candidate_lines += 1;
        if let Some(record) = parse_line(line) {
            parse.records.push(record);
        }
    }

    parse
}

/// Serializes a record into a punch line.
///
/// An unlinked record is written with an empty name.
pub fn format_record(record: &PunchRecord) -> String {
    punch_line(record, record.employee_name.as_deref().unwrap_or_default())
}

fn punch_line(record: &PunchRecord, name: &str) -> String {
    format!(
        "offl_dh:{{hora:{},data:{}}},ident_func:{},nome_func:{}",
        record.time, record.date, record.tax_id, name
    )
}

/// Serializes the punch of `employee` at `at` into a punch line.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rep_p_toolkit::codec::format_punch_line;
/// use rep_p_toolkit::models::Employee;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(8, 5, 0).unwrap();
/// let line = format_punch_line(&Employee::new("Ana", "52998224725"), at);
/// assert_eq!(
///     line,
///     "offl_dh:{hora:08:05,data:2024-03-10},ident_func:52998224725,nome_func:Ana"
/// );
/// ```
pub fn format_punch_line(employee: &Employee, at: NaiveDateTime) -> String {
    punch_line(&PunchRecord::at(employee.tax_id.as_str(), at), &employee.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parses_record_and_ignores_interleaved_line() {
        let text = "offl_dh:{hora:08:15,data:2024-03-10},ident_func:12345678901,nome_func:X\nIGNORED\n";
        let parse = parse_records(text);

        assert_eq!(
            parse.records,
            vec![PunchRecord::new("12345678901", "2024-03-10", "08:15")]
        );
        // Lines 0 and 2 ("" after the trailing newline) are candidates.
        assert_eq!(parse.candidate_lines, 2);
        assert_eq!(parse.skipped(), 1);
    }

    #[test]
    fn test_odd_lines_are_never_read() {
        let valid = "offl_dh:{hora:09:00,data:2024-03-11},ident_func:52998224725,nome_func:A";
        let text = format!("junk\n{}\njunk\n{}", valid, valid);

        assert!(parse_records(&text).records.is_empty());
    }

    #[test]
    fn test_partial_lines_are_dropped() {
        let text = [
            "offl_dh:{hora:08:15,data:2024-03-10},nome_func:sem cpf",
            "",
            "offl_dh:{hora:08:16,data:2024-03-10},ident_func:52998224725",
            "",
            "data:2024-03-10,ident_func:52998224725",
        ]
        .join("\n");

        let parse = parse_records(&text);
        assert_eq!(parse.records.len(), 1);
        assert_eq!(parse.records[0].time, "08:16");
        assert_eq!(parse.skipped(), 2);
    }

    #[test]
    fn test_tax_id_captures_first_eleven_digits() {
        let record =
            parse_line("offl_dh:{hora:10:00,data:2024-01-01},ident_func:529982247251").unwrap();
        assert_eq!(record.tax_id, "52998224725");
    }

    #[test]
    fn test_short_tax_id_is_not_a_record() {
        assert!(parse_line("offl_dh:{hora:10:00,data:2024-01-01},ident_func:5299822472").is_none());
    }

    #[test]
    fn test_carriage_returns_do_not_break_matching() {
        let text = "offl_dh:{hora:08:15,data:2024-03-10},ident_func:12345678901,nome_func:X\r\nIGNORED\r\n";
        assert_eq!(parse_records(text).records.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let parse = parse_records("");
        assert!(parse.records.is_empty());
        assert_eq!(parse.candidate_lines, 1);
    }

    #[test]
    fn test_format_then_parse_drops_the_name() {
        let employee = Employee::new("Ana Silva", "52998224725");
        let at = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();

        let line = format_punch_line(&employee, at);
        let record = parse_line(&line).unwrap();

        assert_eq!(record, PunchRecord::new("52998224725", "2024-12-31", "23:59"));
    }

    #[test]
    fn test_format_unlinked_record_has_empty_name() {
        let record = PunchRecord::new("12345678901", "2024-03-10", "08:15");
        assert_eq!(
            format_record(&record),
            "offl_dh:{hora:08:15,data:2024-03-10},ident_func:12345678901,nome_func:"
        );
    }
}
