//! Text formats read and written by the toolkit.
//!
//! This module contains the punch-line micro-format, the CSV/XML/TXT record
//! exports, the roster parsers and the vocabulary-driven role resolver they
//! share.

mod export;
mod punch_line;
mod resolver;
mod roster;

pub use export::{ExportFormat, escape_xml, export, to_csv, to_txt, to_xml};
pub use punch_line::{RecordParse, format_punch_line, format_record, parse_line, parse_records};
pub use resolver::{ColumnMap, column_index, locate_columns, resolve_role};
pub use roster::{RosterFormat, parse_csv, parse_roster, parse_xml};
