//! Synthetic punch-record generation.
//!
//! For each repetition every roster employee punches at the same instant;
//! the clock then advances by one minute, whatever the roster size. Output
//! is repetition-major, roster-minor.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::info;

use crate::codec::format_punch_line;
use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{Employee, PunchRecord};

/// Clock advance between repetitions, in seconds.
pub const REPETITION_STEP_SECONDS: i64 = 60;

/// One generated punch: who punched and when.
///
/// The punch is rendered with the employee's name, but the record it
/// projects to is unlinked like any parsed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedPunch<'a> {
    /// The employee who punched.
    pub employee: &'a Employee,
    /// The punch instant.
    pub at: NaiveDateTime,
}

impl GeneratedPunch<'_> {
    /// The unlinked punch record.
    pub fn record(&self) -> PunchRecord {
        PunchRecord::at(self.employee.tax_id.as_str(), self.at)
    }

    /// The punch line, including the employee name.
    pub fn line(&self) -> String {
        format_punch_line(self.employee, self.at)
    }
}

/// Accepted spellings of the start timestamp.
const START_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Resolves the requested repetition count.
///
/// Missing, non-numeric and non-positive input all resolve to 1.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::engine::resolve_count;
///
/// assert_eq!(resolve_count(Some(" 5 ")), 5);
/// assert_eq!(resolve_count(Some("0")), 1);
/// assert_eq!(resolve_count(Some("abc")), 1);
/// assert_eq!(resolve_count(None), 1);
/// ```
pub fn resolve_count(input: Option<&str>) -> u32 {
    input
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|count| *count >= 1)
        .unwrap_or(1)
}

/// Number of records a generation run will produce.
pub fn preview_total(roster_len: usize, count: u32) -> usize {
    roster_len * count as usize
}

/// Parses the start timestamp, e.g. `2024-03-10T08:00`.
///
/// # Errors
///
/// Returns `MissingStartTime` for blank input and `InvalidStartTime` when no
/// accepted format matches.
pub fn parse_start(input: &str) -> ToolkitResult<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ToolkitError::MissingStartTime);
    }

    START_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| ToolkitError::InvalidStartTime {
            input: input.to_string(),
        })
}

/// Generates `count` repetitions of one punch per roster employee.
///
/// Repetition `r` is stamped at `start + r` minutes.
///
/// # Errors
///
/// Returns `EmptyRoster` when the roster is empty, and `InvalidStartTime`
/// if the clock would leave the representable range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rep_p_toolkit::engine::generate;
/// use rep_p_toolkit::models::Employee;
///
/// let roster = vec![Employee::new("Ana", "52998224725"), Employee::new("Bia", "11144477735")];
/// let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
///
/// let punches = generate(&roster, start, 3).unwrap();
/// assert_eq!(punches.len(), 6);
/// assert_eq!(punches[2].employee.name, "Ana");
/// assert_eq!(punches[2].record().time, "08:01");
/// assert!(punches[2].record().employee_name.is_none());
/// ```
pub fn generate<'a>(
    roster: impl IntoIterator<Item = &'a Employee>,
    start: NaiveDateTime,
    count: u32,
) -> ToolkitResult<Vec<GeneratedPunch<'a>>> {
    let roster: Vec<&'a Employee> = roster.into_iter().collect();
    if roster.is_empty() {
        return Err(ToolkitError::EmptyRoster);
    }

    let mut punches = Vec::with_capacity(preview_total(roster.len(), count));
    for repetition in 0..i64::from(count) {
        let at = start
            .checked_add_signed(TimeDelta::seconds(repetition * REPETITION_STEP_SECONDS))
            .ok_or_else(|| ToolkitError::InvalidStartTime {
                input: start.to_string(),
            })?;
        punches.extend(
            roster
                .iter()
                .map(|&employee| GeneratedPunch { employee, at }),
        );
    }

    info!(
        employees = roster.len(),
        repetitions = count,
        records = punches.len(),
        "Generated punch records"
    );
    Ok(punches)
}

/// Joins generated punches into a newline-separated punch-line block.
pub fn render_block(punches: &[GeneratedPunch<'_>]) -> String {
    punches
        .iter()
        .map(GeneratedPunch::line)
        .collect::<Vec<_>>()
        .join("\n")
}
