mod cli;

use clap::Parser;
use cli::Args;
use iq_report::adapters::outbound::console::StderrProgressReporter;
use iq_report::adapters::outbound::filesystem::{
    prepare_output_directory, CsvTableWriter, JsonRawReportArchive,
};
use iq_report::adapters::outbound::network::IqServerClient;
use iq_report::application::dto::{ConsolidationRequest, RunSummary};
use iq_report::application::use_cases::ConsolidateReportsUseCase;
use iq_report::config::{discover_config, load_config_from_path, AppConfig, ConfigFile, EnvConfig};
use iq_report::shared::error::ExitCode;
use iq_report::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the diagnostic log filter
const LOG_ENV: &str = "IQ_REPORT_LOG";

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing();

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Diagnostic logging to stderr, filtered by `IQ_REPORT_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<RunSummary> {
    // Resolve configuration: CLI > environment > config file
    let file = load_config_file(args.config.as_deref(), Path::new("."))?;
    let env = EnvConfig::from_env()?;
    let config = AppConfig::resolve(file, env, args.overrides())?;
    tracing::debug!(?config, "configuration resolved");

    let output_dir = prepare_output_directory(&config.output_dir)?;

    // Create adapters (Dependency Injection)
    let iq_server = IqServerClient::new(
        &config.server_url,
        &config.username,
        &config.password,
        config.timeout(),
    )?;
    let table_writer = CsvTableWriter::new(&output_dir);
    let progress_reporter = StderrProgressReporter::new();
    let raw_archive = config
        .keep_raw
        .then(|| JsonRawReportArchive::new(&output_dir));

    // Create use case with injected dependencies
    let use_case =
        ConsolidateReportsUseCase::new(iq_server, table_writer, progress_reporter, raw_archive);

    let request = ConsolidationRequest::new(config.organization_id.clone());
    use_case.execute(request)
}

/// Loads the explicit config file, or discovers one in `dir`
fn load_config_file(explicit: Option<&Path>, dir: &Path) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(dir)?.unwrap_or_default()),
    }
}
