//! Core data models for the REP-P toolkit.
//!
//! This module contains all the domain models used throughout the toolkit.

mod artifact;
mod employee;
mod enrollment;
mod notification;
mod punch_record;
pub mod tax_id;

pub use artifact::Artifact;
pub use employee::Employee;
pub use enrollment::EnrollmentEntity;
pub use notification::{Notification, Severity};
pub use punch_record::PunchRecord;
