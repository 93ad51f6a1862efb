//! Punch record model.
//!
//! A [`PunchRecord`] is one clock-in/out event. Dates and times are kept in
//! the textual form they were captured in (`YYYY-MM-DD`, `HH:MM`) so that the
//! lenient parser never rejects a line for calendar reasons.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One clock-in/out event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Canonical tax id of the employee who punched.
    pub tax_id: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// Wall-clock time, `HH:MM`.
    pub time: String,
    /// Name attached by the linker; `None` until linked.
    pub employee_name: Option<String>,
}

impl PunchRecord {
    /// Creates an unlinked record.
    pub fn new(
        tax_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            tax_id: tax_id.into(),
            date: date.into(),
            time: time.into(),
            employee_name: None,
        }
    }

    /// Creates the unlinked record of `tax_id` punching at `at`.
    pub fn at(tax_id: impl Into<String>, at: NaiveDateTime) -> Self {
        Self::new(
            tax_id,
            at.format("%Y-%m-%d").to_string(),
            at.format("%H:%M").to_string(),
        )
    }

    /// Returns true if the linker attached a name.
    pub fn is_linked(&self) -> bool {
        self.employee_name.is_some()
    }

    /// Projects the ISO date into `DD/MM/YYYY`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rep_p_toolkit::models::PunchRecord;
    ///
    /// let record = PunchRecord::new("52998224725", "2024-03-10", "08:15");
    /// assert_eq!(record.date_br(), "10/03/2024");
    /// ```
    pub fn date_br(&self) -> String {
        let mut parts = self.date.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(year), Some(month), Some(day)) => format!("{}/{}/{}", day, month, year),
            _ => self.date.clone(),
        }
    }

    /// Returns the attached name or `unlinked_label` when unlinked.
    pub fn display_name<'a>(&'a self, unlinked_label: &'a str) -> &'a str {
        self.employee_name.as_deref().unwrap_or(unlinked_label)
    }
}
