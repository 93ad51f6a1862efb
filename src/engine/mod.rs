//! Record generation, linking and enrollment assembly.
//!
//! This module contains the algorithms that operate on parsed data:
//! generating synthetic punches for a roster, linking punch records to
//! employees, filtering records by date, and assembling enrollment entities
//! from parallel column input.

mod enrollment;
mod filter;
mod generator;
mod linker;
mod roster_import;

pub use enrollment::{EnrollmentInput, assemble_enrollment, enrollment_json};
pub use filter::{filter_indices, matches_date_filter};
pub use generator::{
    GeneratedPunch, REPETITION_STEP_SECONDS, generate, parse_start, preview_total, render_block,
    resolve_count,
};
pub use linker::{EmployeeIndex, LinkReport, link, normalize_name};
pub use roster_import::import_roster;
