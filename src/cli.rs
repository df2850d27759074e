use clap::Parser;
use std::path::PathBuf;

use iq_report::config::CliOverrides;

/// Consolidate Sonatype IQ Server policy violation reports into one CSV
#[derive(Parser, Debug)]
#[command(name = "iq-report")]
#[command(version)]
#[command(
    about = "Consolidate Sonatype IQ Server policy violation reports into one CSV",
    long_about = "Fetches the latest policy report of every application on an IQ Server, \
                  tallies violations per severity and writes consolidated_security_report.csv.\n\n\
                  The password is read from the IQ_PASSWORD environment variable or the config file."
)]
pub struct Args {
    /// IQ Server base URL (overrides IQ_SERVER_URL)
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// IQ Server username (overrides IQ_USERNAME)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Only process applications of this organization (overrides ORGANIZATION_ID)
    #[arg(long, value_name = "ID")]
    pub organization_id: Option<String>,

    /// Directory for the consolidated CSV and raw reports (overrides OUTPUT_DIR)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds (overrides IQ_TIMEOUT_SECS)
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Also save every fetched report as JSON in the output directory
    #[arg(long)]
    pub keep_raw: bool,

    /// Path to a config file (defaults to ./iq-report.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            server_url: self.server_url.clone(),
            username: self.username.clone(),
            organization_id: self.organization_id.clone(),
            output_dir: self.output_dir.clone(),
            timeout_secs: self.timeout,
            keep_raw: self.keep_raw,
        }
    }
}
