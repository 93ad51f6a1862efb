//! The working set of one toolkit session.
//!
//! [`Session`] owns every collection the toolkit operates on and runs each
//! operation to completion against them. Every operation reports its outcome
//! to a [`NotificationSink`] and returns it; a failed operation leaves the
//! session unchanged.

use std::path::Path;

use tracing::info;
use uuid::Uuid;

use crate::codec::{self, ExportFormat};
use crate::config::ToolkitConfig;
use crate::engine::{self, EnrollmentInput, LinkReport};
use crate::error::{ToolkitError, ToolkitResult};
use crate::models::{Artifact, Employee, PunchRecord, Severity};

use super::load::{InputFile, LoadGenerations, LoadTarget, LoadTicket, read_input};
use super::sink::{Clipboard, NotificationSink, copy_with_fallback};

/// An employee on the generator roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Session-unique id used to remove the entry.
    pub id: Uuid,
    /// The employee.
    pub employee: Employee,
}

/// The in-memory state of one session.
#[derive(Debug, Default)]
pub struct Session {
    config: ToolkitConfig,
    employees: Vec<Employee>,
    all_records: Vec<PunchRecord>,
    filtered: Vec<usize>,
    generations: LoadGenerations,
    generator_roster: Vec<RosterEntry>,
    generated_block: Option<String>,
    enrollment_json: Option<String>,
}

/// Notifies the outcome of `result` and passes it through.
fn report<T>(
    notifier: &dyn NotificationSink,
    result: ToolkitResult<T>,
    success: impl FnOnce(&T) -> String,
) -> ToolkitResult<T> {
    match &result {
        Ok(value) => notifier.notify(&success(value), Severity::Success),
        Err(error) => notifier.notify(&error.to_string(), error.severity()),
    }
    result
}

impl Session {
    /// Creates an empty session using `config`.
    pub fn new(config: ToolkitConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Returns the session configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// The roster used for linking.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Every loaded punch record, in file order.
    pub fn all_records(&self) -> &[PunchRecord] {
        &self.all_records
    }

    /// The records visible through the current filter.
    pub fn filtered_records(&self) -> Vec<&PunchRecord> {
        self.filtered.iter().map(|&i| &self.all_records[i]).collect()
    }

    /// Number of records visible through the current filter.
    pub fn record_count(&self) -> usize {
        self.filtered.len()
    }

    fn reset_view(&mut self) {
        self.filtered = (0..self.all_records.len()).collect();
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Begins a punch-record load, superseding any load in flight.
    pub fn begin_records_load(&mut self) -> LoadTicket {
        self.generations.begin(LoadTarget::Records)
    }

    /// Begins a roster load, superseding any load in flight.
    pub fn begin_roster_load(&mut self) -> LoadTicket {
        self.generations.begin(LoadTarget::Roster)
    }

    /// Commits punch-file content read under `ticket`.
    ///
    /// Replaces every loaded record and resets the view. Returns the number
    /// of records parsed.
    pub fn finish_records_load(
        &mut self,
        ticket: LoadTicket,
        input: &InputFile,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let result = self.generations.check(ticket).map(|()| {
            let parse = codec::parse_records(&input.text);
            info!(
                records = parse.records.len(),
                skipped = parse.skipped(),
                generation = ticket.generation,
                "Loaded punch records"
            );
            self.all_records = parse.records;
            self.reset_view();
            self.all_records.len()
        });
        report(notifier, result, |count| format!("{} registros carregados!", count))
    }

    /// Commits roster-file content read under `ticket`.
    ///
    /// On success the roster is replaced; on failure the previous roster is
    /// kept. Returns the number of employees parsed.
    pub fn finish_roster_load(
        &mut self,
        ticket: LoadTicket,
        input: &InputFile,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let result = self
            .generations
            .check(ticket)
            .and_then(|()| codec::parse_roster(&input.text, &input.extension, &self.config.roster))
            .map(|employees| {
                info!(
                    employees = employees.len(),
                    generation = ticket.generation,
                    "Loaded roster"
                );
                self.employees = employees;
                self.employees.len()
            });
        let format = input.extension.to_uppercase();
        report(notifier, result, |count| {
            format!("{} funcionários carregados do {}", count, format)
        })
    }

    /// Reads and commits the punch file at `path`.
    pub async fn load_records_file(
        &mut self,
        path: impl AsRef<Path>,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let ticket = self.begin_records_load();
        match read_input(path).await {
            Ok(input) => self.finish_records_load(ticket, &input, notifier),
            Err(error) => report(notifier, Err(error), |_: &usize| String::new()),
        }
    }

    /// Reads and commits the roster file at `path`.
    pub async fn load_roster_file(
        &mut self,
        path: impl AsRef<Path>,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let ticket = self.begin_roster_load();
        match read_input(path).await {
            Ok(input) => self.finish_roster_load(ticket, &input, notifier),
            Err(error) => report(notifier, Err(error), |_: &usize| String::new()),
        }
    }

    // ------------------------------------------------------------------
    // Conversion
    // ------------------------------------------------------------------

    /// Recomputes the view from a date filter; returns the visible count.
    pub fn apply_date_filter(&mut self, filter: &str) -> usize {
        self.filtered = engine::filter_indices(&self.all_records, filter);
        self.filtered.len()
    }

    /// Links every loaded record against the roster and resets the view.
    pub fn link(&mut self, notifier: &dyn NotificationSink) -> ToolkitResult<LinkReport> {
        let result = if self.employees.is_empty() {
            Err(ToolkitError::NoEmployeesLoaded)
        } else if self.all_records.is_empty() {
            Err(ToolkitError::NoRecordsLoaded)
        } else {
            let link_report = engine::link(&mut self.all_records, &self.employees);
            self.reset_view();
            Ok(link_report)
        };
        report(notifier, result, |r| {
            format!("{} registros vinculados com sucesso", r.linked)
        })
    }

    /// Renders the visible records in `format`.
    pub fn export(
        &self,
        format: ExportFormat,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<Artifact> {
        let records = self.filtered_records();
        let result = codec::export(&records, format, &self.config.export);
        report(notifier, result, |_| {
            format!("Arquivo {} gerado!", format.extension().to_uppercase())
        })
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// The generator roster.
    pub fn generator_roster(&self) -> &[RosterEntry] {
        &self.generator_roster
    }

    /// Replaces the generator roster from parallel name and CPF lists.
    pub fn import_generator_roster(
        &mut self,
        names: &str,
        tax_ids: &str,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let result = engine::import_roster(names, tax_ids).map(|employees| {
            self.generator_roster = employees
                .into_iter()
                .map(|employee| RosterEntry {
                    id: Uuid::new_v4(),
                    employee,
                })
                .collect();
            self.generator_roster.len()
        });
        report(notifier, result, |count| {
            format!("{} funcionários importados com sucesso!", count)
        })
    }

    /// Removes one employee from the generator roster.
    pub fn remove_generator_employee(
        &mut self,
        id: Uuid,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<Employee> {
        let result = self
            .generator_roster
            .iter()
            .position(|entry| entry.id == id)
            .map(|position| self.generator_roster.remove(position).employee)
            .ok_or_else(|| ToolkitError::EmployeeNotFound { id: id.to_string() });
        match &result {
            Ok(_) => notifier.notify("Funcionário removido", Severity::Info),
            Err(error) => notifier.notify(&error.to_string(), error.severity()),
        }
        result
    }

    /// Number of records a generation with `count_input` would produce.
    pub fn preview_total(&self, count_input: Option<&str>) -> usize {
        engine::preview_total(self.generator_roster.len(), engine::resolve_count(count_input))
    }

    /// Generates punch lines for the generator roster.
    ///
    /// Returns the number of records generated; the block is kept for
    /// [`Session::generated_block`].
    pub fn generate(
        &mut self,
        start_input: &str,
        count_input: Option<&str>,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let generated = if self.generator_roster.is_empty() {
            Err(ToolkitError::EmptyRoster)
        } else {
            engine::parse_start(start_input).and_then(|start| {
                engine::generate(
                    self.generator_roster.iter().map(|entry| &entry.employee),
                    start,
                    engine::resolve_count(count_input),
                )
            })
        };
        let result = generated.map(|punches| {
            self.generated_block = Some(engine::render_block(&punches));
            punches.len()
        });
        report(notifier, result, |count| {
            format!("{} registros gerados com sucesso!", count)
        })
    }

    /// The last generated punch-line block.
    pub fn generated_block(&self) -> Option<&str> {
        self.generated_block.as_deref()
    }

    /// The last generated block as a downloadable artifact.
    pub fn generated_artifact(&self) -> ToolkitResult<Artifact> {
        self.generated_block
            .as_ref()
            .map(|block| {
                Artifact::new(
                    block.clone(),
                    &self.config.generator.base_filename,
                    "txt",
                    "text/plain",
                )
            })
            .ok_or(ToolkitError::NothingGenerated)
    }

    /// Copies the last generated block to the clipboard.
    pub async fn copy_generated<P, F>(
        &self,
        primary: &P,
        fallback: &F,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<()>
    where
        P: Clipboard,
        F: Clipboard,
    {
        let result = match self.generated_block.as_deref() {
            Some(block) => copy_with_fallback(primary, fallback, block).await,
            None => Err(ToolkitError::NothingGenerated),
        };
        report(notifier, result, |_| {
            "Registros copiados para a área de transferência!".to_string()
        })
    }

    // ------------------------------------------------------------------
    // Enrollment
    // ------------------------------------------------------------------

    /// Assembles enrollment JSON from parallel column input.
    ///
    /// Returns the number of entities; the JSON is kept for
    /// [`Session::enrollment_json`].
    pub fn assemble_enrollment(
        &mut self,
        input: &EnrollmentInput<'_>,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<usize> {
        let result = engine::assemble_enrollment(input).and_then(|entities| {
            let json = engine::enrollment_json(&entities)?;
            self.enrollment_json = Some(json);
            Ok(entities.len())
        });
        report(notifier, result, |count| {
            format!("JSON gerado com {} funcionários!", count)
        })
    }

    /// The last assembled enrollment JSON.
    pub fn enrollment_json(&self) -> Option<&str> {
        self.enrollment_json.as_deref()
    }

    /// Copies the last enrollment JSON to the clipboard.
    pub async fn copy_enrollment<P, F>(
        &self,
        primary: &P,
        fallback: &F,
        notifier: &dyn NotificationSink,
    ) -> ToolkitResult<()>
    where
        P: Clipboard,
        F: Clipboard,
    {
        let result = match self.enrollment_json.as_deref() {
            Some(json) => copy_with_fallback(primary, fallback, json).await,
            None => Err(ToolkitError::NothingGenerated),
        };
        report(notifier, result, |_| {
            "JSON copiado para a área de transferência!".to_string()
        })
    }

    /// The last enrollment JSON as a downloadable artifact.
    pub fn enrollment_artifact(&self) -> ToolkitResult<Artifact> {
        self.enrollment_json
            .as_ref()
            .map(|json| {
                Artifact::new(
                    json.clone(),
                    &self.config.enrollment.base_filename,
                    "json",
                    "application/json",
                )
            })
            .ok_or(ToolkitError::NothingGenerated)
    }
}
