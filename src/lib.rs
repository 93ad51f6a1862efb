//! REP-P punch-record toolkit
//!
//! This crate parses, links, generates and converts the punch records written
//! by REP-P time clocks. It validates CPFs, reads employee rosters from CSV
//! and XML, exports records as CSV, XML or TXT, and assembles the JSON used to
//! enroll employees on a device.

#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod session;
