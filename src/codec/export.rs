//! CSV, XML and plain-text exports of punch records.
//!
//! Every layout renders the record's date as `DD/MM/YYYY` and shows the
//! configured unlinked label in place of the name of an unlinked record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ExportConfig;
use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{Artifact, PunchRecord, tax_id};

/// The export layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// `CPF,Nome,Data,Hora` rows.
    Csv,
    /// `<registros>` document.
    Xml,
    /// Human-readable stanzas.
    Txt,
}

impl ExportFormat {
    /// File extension for this layout.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Txt => "txt",
        }
    }

    /// MIME type for this layout.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xml => "text/xml",
            ExportFormat::Txt => "text/plain",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(ToolkitError::UnsupportedExportFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Escapes the five XML special characters.
///
/// # Examples
///
/// ```
/// use rep_p_toolkit::codec::escape_xml;
///
/// assert_eq!(escape_xml("Zé & <Cia> \"'"), "Zé &amp; &lt;Cia&gt; &quot;&#39;");
/// ```
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders records as CSV.
///
/// The name column is always quoted; embedded quotes are doubled.
pub fn to_csv<'a>(records: impl IntoIterator<Item = &'a PunchRecord>, unlinked_label: &str) -> String {
    let mut csv = String::from("CPF,Nome,Data,Hora\n");
    for record in records {
        csv.push_str(&format!(
            "{},\"{}\",{},{}\n",
            record.tax_id,
            record.display_name(unlinked_label).replace('"', "\"\""),
            record.date_br(),
            record.time
        ));
    }
    csv
}

/// Renders records as an XML document.
pub fn to_xml<'a>(records: impl IntoIterator<Item = &'a PunchRecord>, unlinked_label: &str) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<registros>\n");
    for record in records {
        xml.push_str("  <registro>\n");
        xml.push_str(&format!("    <cpf>{}</cpf>\n", escape_xml(&record.tax_id)));
        xml.push_str(&format!(
            "    <nome>{}</nome>\n",
            escape_xml(record.display_name(unlinked_label))
        ));
        xml.push_str(&format!("    <data>{}</data>\n", escape_xml(&record.date_br())));
        xml.push_str(&format!("    <hora>{}</hora>\n", escape_xml(&record.time)));
        xml.push_str("  </registro>\n");
    }
    xml.push_str("</registros>");
    xml
}

/// Renders records as plain-text stanzas with a masked CPF.
pub fn to_txt<'a>(records: impl IntoIterator<Item = &'a PunchRecord>, unlinked_label: &str) -> String {
    let mut txt = String::from("REGISTROS DE PONTO\n==================\n\n");
    for record in records {
        txt.push_str(&format!("CPF: {}\n", tax_id::format(&record.tax_id)));
        txt.push_str(&format!("Nome: {}\n", record.display_name(unlinked_label)));
        txt.push_str(&format!("Data: {}\n", record.date_br()));
        txt.push_str(&format!("Hora: {}\n", record.time));
        txt.push_str("-------------------\n");
    }
    txt
}

/// Renders `records` in `format` as a downloadable artifact.
///
/// # Errors
///
/// Returns `NothingToExport` when `records` is empty.
pub fn export(
    records: &[&PunchRecord],
    format: ExportFormat,
    config: &ExportConfig,
) -> ToolkitResult<Artifact> {
    if records.is_empty() {
        return Err(ToolkitError::NothingToExport);
    }

    let label = config.unlinked_label.as_str();
    let rows = records.iter().copied();
    let content = match format {
        ExportFormat::Csv => to_csv(rows, label),
        ExportFormat::Xml => to_xml(rows, label),
        ExportFormat::Txt => to_txt(rows, label),
    };

    info!(format = %format, records = records.len(), "Exported punch records");

    Ok(Artifact::new(
        content,
        &config.base_filename,
        format.extension(),
        format.mime_type(),
    ))
}
