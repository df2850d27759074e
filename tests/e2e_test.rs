/// End-to-end tests for the CLI
///
/// Every invocation runs in its own temporary directory with the IQ Server
/// environment variables removed, so the host environment cannot leak in.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const IQ_ENV_VARS: [&str; 6] = [
    "IQ_SERVER_URL",
    "IQ_USERNAME",
    "IQ_PASSWORD",
    "ORGANIZATION_ID",
    "OUTPUT_DIR",
    "IQ_TIMEOUT_SECS",
];

/// Builds an isolated command running inside `dir`
fn iq_report(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("iq-report");
    cmd.current_dir(dir.path());
    for var in IQ_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--server-url"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir).arg("--invalid-option").assert().code(2);
    }

    /// Exit code 2: Invalid timeout value
    #[test]
    fn test_exit_code_invalid_timeout() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir).args(["--timeout", "soon"]).assert().code(2);
    }

    /// Exit code 2: The password cannot be passed on the command line
    #[test]
    fn test_exit_code_password_flag_rejected() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .args(["--password", "secret"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - no configuration at all
    #[test]
    fn test_exit_code_missing_configuration() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("IQ_SERVER_URL"))
            .stderr(predicate::str::contains("💡 Hint"));
    }

    /// Exit code 3: Application error - missing password
    #[test]
    fn test_exit_code_missing_password() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .env("IQ_SERVER_URL", "https://iq.example.com")
            .env("IQ_USERNAME", "admin")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("IQ_PASSWORD"));
    }

    /// Exit code 3: Application error - malformed server URL
    #[test]
    fn test_exit_code_invalid_server_url() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .args(["--server-url", "ftp://iq.example.com", "-u", "admin"])
            .env("IQ_PASSWORD", "secret")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid IQ Server URL"));
    }

    /// Exit code 3: Application error - explicit config file does not exist
    #[test]
    fn test_exit_code_missing_config_file() {
        let dir = TempDir::new().unwrap();
        iq_report(&dir)
            .args(["--config", "does-not-exist.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}

mod config_file_tests {
    use super::*;

    /// Unreachable server: the application listing fails
    fn unreachable_config() -> &'static str {
        r#"
server_url: http://127.0.0.1:9
username: admin
password: secret
timeout_secs: 2
"#
    }

    #[test]
    fn test_discovered_config_is_used_and_listing_failure_ends_cleanly() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("iq-report.config.yml"), unreachable_config()).unwrap();

        iq_report(&dir)
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Could not list applications"))
            .stderr(predicate::str::contains(
                "Failed to fetch applications from IQ Server",
            ))
            .stderr(predicate::str::contains("No data was consolidated"));

        assert!(dir.path().join("raw_reports").is_dir());
        assert!(!dir
            .path()
            .join("raw_reports")
            .join("consolidated_security_report.csv")
            .exists());
    }

    #[test]
    fn test_explicit_config_and_cli_output_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("custom.yml"), unreachable_config()).unwrap();

        iq_report(&dir)
            .args(["-c", "custom.yml", "-o", "out"])
            .assert()
            .code(0);

        assert!(dir.path().join("out").is_dir());
        assert!(!dir.path().join("raw_reports").exists());
    }

    #[test]
    fn test_unknown_config_field_warns() {
        let dir = TempDir::new().unwrap();
        let content = format!("{}report_format: xlsx\n", unreachable_config());
        fs::write(dir.path().join("iq-report.config.yml"), content).unwrap();

        iq_report(&dir)
            .assert()
            .code(0)
            .stderr(predicate::str::contains(
                "Unknown config field 'report_format'",
            ));
    }

    #[test]
    fn test_environment_overrides_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("iq-report.config.yml"), unreachable_config()).unwrap();

        iq_report(&dir)
            .env("IQ_SERVER_URL", "gopher://iq.example.com")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid IQ Server URL"));
    }
}
