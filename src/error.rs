//! Error types for the REP-P toolkit.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the toolkit reports. The `Display` text of each variant
//! is the user-facing message, written in the product language (Portuguese).

use thiserror::Error;

use crate::models::Severity;

/// The main error type for the REP-P toolkit.
///
/// Nothing in the toolkit is fatal: every variant describes an operation
/// that was aborted without committing partial state.
///
/// # Example
///
/// ```
/// use rep_p_toolkit::error::ToolkitError;
///
/// let error = ToolkitError::InvalidTaxIds {
///     values: vec!["123".to_string(), "11111111111".to_string()],
/// };
/// assert_eq!(
///     error.to_string(),
///     "CPFs inválidos encontrados: 123, 11111111111"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// Configuration file was not found at the specified path.
    #[error("Arquivo de configuração não encontrado: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Falha ao interpretar o arquivo de configuração '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its tables are unusable.
    #[error("Configuração inválida: {message}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        message: String,
    },

    /// One or more tax ids failed checksum validation.
    #[error("CPFs inválidos encontrados: {}", .values.join(", "))]
    InvalidTaxIds {
        /// The offending raw values, in input order.
        values: Vec<String>,
    },

    /// A name or tax-id list was empty on roster import.
    #[error("Por favor, preencha os nomes e CPFs dos funcionários")]
    MissingNamesOrTaxIds,

    /// Names and tax ids had different line counts on roster import.
    #[error("A quantidade de nomes deve ser igual à quantidade de CPFs ({names} nomes, {tax_ids} CPFs)")]
    NameTaxIdCountMismatch {
        /// Number of non-blank name lines.
        names: usize,
        /// Number of non-blank tax-id lines.
        tax_ids: usize,
    },

    /// One of the required enrollment columns was empty.
    #[error("Preencha pelo menos os campos obrigatórios: Nome, CPF e Matrícula")]
    MissingRequiredFields,

    /// Required enrollment columns had different line counts.
    #[error(
        "Todos os campos obrigatórios devem ter a mesma quantidade de linhas ({names} nomes, {tax_ids} CPFs, {registrations} matrículas)"
    )]
    RequiredFieldCountMismatch {
        /// Number of non-blank name lines.
        names: usize,
        /// Number of non-blank tax-id lines.
        tax_ids: usize,
        /// Number of non-blank registration-number lines.
        registrations: usize,
    },

    /// The CSV roster header lacks a name or tax-id column.
    #[error("Arquivo CSV deve conter colunas \"nome\" e \"cpf\"")]
    MissingRosterColumns,

    /// The CSV roster could not be read.
    #[error("Erro ao processar arquivo CSV: {message}")]
    CsvParse {
        /// A description of the parse error.
        message: String,
    },

    /// The XML roster is not well-formed.
    #[error("Erro ao processar arquivo XML: {message}")]
    XmlParse {
        /// A description of the parse error.
        message: String,
    },

    /// The roster file extension is neither CSV nor XML.
    #[error("Formato de arquivo de funcionários não suportado: '{extension}'")]
    UnsupportedRosterFormat {
        /// The extension hint that was received.
        extension: String,
    },

    /// The requested export layout does not exist.
    #[error("Formato de exportação não suportado: '{format}'")]
    UnsupportedExportFormat {
        /// The requested layout.
        format: String,
    },

    /// Generation was requested with an empty roster.
    #[error("Adicione funcionários antes de gerar registros")]
    EmptyRoster,

    /// Generation was requested without a start timestamp.
    #[error("Selecione a data e hora inicial")]
    MissingStartTime,

    /// The start timestamp could not be parsed.
    #[error("Data e hora inicial inválida: '{input}'")]
    InvalidStartTime {
        /// The raw input.
        input: String,
    },

    /// A generator roster entry with the given id does not exist.
    #[error("Funcionário não encontrado: {id}")]
    EmployeeNotFound {
        /// The entry id that was requested.
        id: String,
    },

    /// Linking was requested before a roster was loaded.
    #[error("Carregue primeiro um arquivo de funcionários")]
    NoEmployeesLoaded,

    /// Linking was requested before punch records were loaded.
    #[error("Carregue primeiro um arquivo de registros de ponto")]
    NoRecordsLoaded,

    /// Export was requested on an empty record view.
    #[error("Não há registros para exportar")]
    NothingToExport,

    /// Copy or download was requested before anything was generated.
    #[error("Gere o conteúdo primeiro")]
    NothingGenerated,

    /// Neither clipboard accepted the text.
    #[error("Erro ao copiar para a área de transferência: {message}")]
    ClipboardUnavailable {
        /// The last clipboard failure.
        message: String,
    },

    /// A load completed after a newer load of the same collection began.
    #[error("Carregamento descartado: geração {generation} foi substituída pela geração {current}")]
    StaleLoad {
        /// The generation of the discarded load.
        generation: u64,
        /// The newest generation for the collection.
        current: u64,
    },

    /// An input file could not be read or an artifact could not be written.
    #[error("Erro de E/S em '{path}': {message}")]
    Io {
        /// The path involved.
        path: String,
        /// The underlying error.
        message: String,
    },

    /// Structured output could not be serialized.
    #[error("Erro ao gerar JSON: {message}")]
    Serialization {
        /// The underlying error.
        message: String,
    },
}

impl ToolkitError {
    /// Returns the notification severity this error is reported with.
    ///
    /// Empty-input guards are warnings; validation and parse failures are
    /// errors.
    pub fn severity(&self) -> Severity {
        match self {
            ToolkitError::MissingNamesOrTaxIds
            | ToolkitError::MissingRequiredFields
            | ToolkitError::EmptyRoster
            | ToolkitError::MissingStartTime
            | ToolkitError::NoEmployeesLoaded
            | ToolkitError::NoRecordsLoaded
            | ToolkitError::NothingToExport
            | ToolkitError::NothingGenerated
            | ToolkitError::StaleLoad { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A type alias for Results that return ToolkitError.
pub type ToolkitResult<T> = Result<T, ToolkitError>;
