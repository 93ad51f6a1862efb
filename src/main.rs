//! Command-line front end for the REP-P punch-record toolkit.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rep_p_toolkit::codec::ExportFormat;
use rep_p_toolkit::config::{ConfigLoader, ToolkitConfig};
use rep_p_toolkit::engine::EnrollmentInput;
use rep_p_toolkit::error::{ToolkitError, ToolkitResult};
use rep_p_toolkit::models::Artifact;
use rep_p_toolkit::session::{
    DirectoryDownloadSink, DownloadSink, NotificationSink, Session, TracingNotifier, read_input,
};

#[derive(Parser, Debug)]
#[command(name = "rep-p", version, about = "REP-P punch-record toolkit")]
struct Cli {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory to write output into; output goes to stdout when omitted
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate synthetic punch lines for a roster
    Generate(GenerateCommand),
    /// Assemble enrollment JSON from column files
    Enroll(EnrollCommand),
    /// Link a punch file to a roster and export it
    Convert(ConvertCommand),
}

#[derive(Args, Debug)]
struct GenerateCommand {
    /// File with one employee name per line
    #[arg(long)]
    names: PathBuf,
    /// File with one CPF per line
    #[arg(long)]
    cpfs: PathBuf,
    /// Start timestamp, e.g. 2024-03-10T08:00
    #[arg(long)]
    start: String,
    /// Punches per employee
    #[arg(long)]
    count: Option<String>,
}

#[derive(Args, Debug)]
struct EnrollCommand {
    /// File with one employee name per line
    #[arg(long)]
    names: PathBuf,
    /// File with one CPF per line
    #[arg(long)]
    cpfs: PathBuf,
    /// File with one registration number per line
    #[arg(long)]
    registrations: PathBuf,
    /// File with one badge value per line
    #[arg(long)]
    badges: Option<PathBuf>,
    /// File with one password per line
    #[arg(long)]
    passwords: Option<PathBuf>,
    /// File with one biometric template per line
    #[arg(long)]
    biometrics: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertCommand {
    /// Punch file exported by the time clock
    #[arg(long)]
    records: PathBuf,
    /// Employee roster (.csv or .xml) to link against
    #[arg(long)]
    roster: Option<PathBuf>,
    /// Export layout: csv, xml or txt
    #[arg(long, default_value = "csv")]
    format: ExportFormat,
    /// Date filter, DD/MM/YYYY or any fragment of it
    #[arg(long)]
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli, &TracingNotifier).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reports a failure that did not pass through a session operation.
fn report_failure(notifier: &dyn NotificationSink, error: ToolkitError) -> ToolkitError {
    notifier.notify(&error.to_string(), error.severity());
    error
}

/// Runs one subcommand. Each failure reaches `notifier` exactly once.
async fn run(cli: Cli, notifier: &dyn NotificationSink) -> ToolkitResult<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)
            .map_err(|e| report_failure(notifier, e))?
            .into_config(),
        None => ToolkitConfig::default(),
    };
    let mut session = Session::new(config);

    let artifact = match cli.command {
        Commands::Generate(opts) => generate(&mut session, opts, notifier).await?,
        Commands::Enroll(opts) => enroll(&mut session, opts, notifier).await?,
        Commands::Convert(opts) => convert(&mut session, opts, notifier).await?,
    };

    deliver(&artifact, cli.out.as_deref()).map_err(|e| report_failure(notifier, e))
}

async fn read_text(path: &Path, notifier: &dyn NotificationSink) -> ToolkitResult<String> {
    let input = read_input(path)
        .await
        .map_err(|e| report_failure(notifier, e))?;
    Ok(input.text)
}

async fn read_optional(
    path: Option<&Path>,
    notifier: &dyn NotificationSink,
) -> ToolkitResult<String> {
    match path {
        Some(path) => read_text(path, notifier).await,
        None => Ok(String::new()),
    }
}

async fn generate(
    session: &mut Session,
    opts: GenerateCommand,
    notifier: &dyn NotificationSink,
) -> ToolkitResult<Artifact> {
    let names = read_text(&opts.names, notifier).await?;
    let cpfs = read_text(&opts.cpfs, notifier).await?;

    session.import_generator_roster(&names, &cpfs, notifier)?;
    tracing::info!(
        total = session.preview_total(opts.count.as_deref()),
        "Generating punch records"
    );
    session.generate(&opts.start, opts.count.as_deref(), notifier)?;
    session.generated_artifact()
}

async fn enroll(
    session: &mut Session,
    opts: EnrollCommand,
    notifier: &dyn NotificationSink,
) -> ToolkitResult<Artifact> {
    let names = read_text(&opts.names, notifier).await?;
    let tax_ids = read_text(&opts.cpfs, notifier).await?;
    let registrations = read_text(&opts.registrations, notifier).await?;
    let badges = read_optional(opts.badges.as_deref(), notifier).await?;
    let passwords = read_optional(opts.passwords.as_deref(), notifier).await?;
    let biometrics = read_optional(opts.biometrics.as_deref(), notifier).await?;

    let input = EnrollmentInput {
        names: &names,
        tax_ids: &tax_ids,
        registrations: &registrations,
        badges: &badges,
        passwords: &passwords,
        biometrics: &biometrics,
    };
    session.assemble_enrollment(&input, notifier)?;
    session.enrollment_artifact()
}

async fn convert(
    session: &mut Session,
    opts: ConvertCommand,
    notifier: &dyn NotificationSink,
) -> ToolkitResult<Artifact> {
    session.load_records_file(&opts.records, notifier).await?;

    if let Some(roster) = &opts.roster {
        session.load_roster_file(roster, notifier).await?;
        session.link(notifier)?;
    }
    if let Some(filter) = &opts.filter {
        let visible = session.apply_date_filter(filter);
        tracing::info!(filter = %filter, visible, "Applied date filter");
    }

    session.export(opts.format, notifier)
}

fn deliver(artifact: &Artifact, out: Option<&Path>) -> ToolkitResult<()> {
    match out {
        Some(directory) => {
            let path = DirectoryDownloadSink::new(directory).deliver(artifact)?;
            println!("{}", path.display());
        }
        None => print!("{}", artifact.content),
    }
    Ok(())
}
