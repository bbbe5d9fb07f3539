//! Command line handling for the `authprobe` binary.

use std::sync::Arc;

use authprobe_application::{BaseClient, HttpClient, HttpClientError, LoginService, UpdatePasswordService};
use authprobe_infrastructure::{ApiSettings, ReqwestHttpClient, SettingsError};
use clap::Parser;
use thiserror::Error;

use crate::runner::{SuiteRunner, SuiteSelection};

/// Errors raised before any scenario runs.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Transport(#[from] HttpClientError),
}

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// End-to-end scenario suite for the login and password update APIs.
#[derive(Parser, Debug, Clone, Copy, PartialEq, Eq)]
#[command(name = "authprobe", version)]
pub struct CliArgs {
    /// Suites to run.
    #[arg(value_enum, value_name = "SUITE", ignore_case = true, default_value_t = SuiteSelection::All)]
    pub selection: SuiteSelection,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
    /// Stop after the first scenario that does not pass.
    #[arg(long)]
    pub fail_fast: bool,
}

impl CliArgs {
    /// Report format chosen on the command line.
    #[must_use]
    pub const fn format(&self) -> ReportFormat {
        if self.json { ReportFormat::Json } else { ReportFormat::Text }
    }
}

/// Wires services for `selection` over `transport`.
///
/// # Errors
///
/// Returns [`SettingsError::MissingLoginUrl`] when login scenarios are
/// selected explicitly without a login URL.
pub fn build_runner(
    settings: &ApiSettings,
    selection: SuiteSelection,
    transport: Arc<dyn HttpClient>,
) -> Result<SuiteRunner, CliError> {
    let client = BaseClient::new(transport);
    let mut runner = SuiteRunner::new();

    match (selection, settings.require_login_url()) {
        (SuiteSelection::UpdatePassword, _) => {}
        (_, Ok(url)) => runner = runner.with_login(LoginService::new(client.clone(), url)),
        (SuiteSelection::Login, Err(err)) => return Err(err.into()),
        (SuiteSelection::All, Err(_)) => {
            tracing::warn!("login_url is not set, skipping login scenarios");
        }
    }

    if selection != SuiteSelection::Login {
        runner = runner.with_update_password(UpdatePasswordService::with_url(
            client,
            settings.update_password_url(),
        ));
    }
    Ok(runner)
}

/// Builds the reqwest transport from settings.
///
/// # Errors
///
/// Returns an error if the client cannot be created.
pub fn transport(settings: &ApiSettings) -> Result<Arc<dyn HttpClient>, CliError> {
    Ok(Arc::new(ReqwestHttpClient::with_timeout(settings.request_timeout())?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(login_url: Option<&str>) -> ApiSettings {
        ApiSettings {
            base_url: "http://localhost:8080/".to_string(),
            login_url: login_url.map(ToString::to_string),
            request_timeout_ms: 1000,
        }
    }

    fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("authprobe").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.selection, SuiteSelection::All);
        assert_eq!(args.format(), ReportFormat::Text);
        assert!(!args.fail_fast);
    }

    #[test]
    fn test_parse_flags_in_any_order() {
        let args = parse(&["--json", "login", "--fail-fast"]).unwrap();
        assert_eq!(
            args,
            CliArgs {
                selection: SuiteSelection::Login,
                json: true,
                fail_fast: true,
            }
        );
        assert_eq!(args.format(), ReportFormat::Json);
    }

    #[test]
    fn test_parse_suite_names() {
        assert_eq!(parse(&["update-password"]).unwrap().selection, SuiteSelection::UpdatePassword);
        assert_eq!(parse(&["update_password"]).unwrap().selection, SuiteSelection::UpdatePassword);
        assert_eq!(parse(&["LOGIN"]).unwrap().selection, SuiteSelection::Login);
    }

    #[test]
    fn test_parse_errors() {
        use clap::error::ErrorKind;

        assert_eq!(parse(&["logout"]).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(parse(&["--verbose"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse(&["login", "all"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_build_runner_skips_login_without_url() {
        let settings = settings(None);
        let transport = transport(&settings).unwrap();

        let runner = build_runner(&settings, SuiteSelection::All, transport.clone()).unwrap();
        let scenarios = runner.scenarios(SuiteSelection::All);
        assert!(!scenarios.is_empty());
        assert!(scenarios.iter().all(|s| s.endpoint() == crate::scenarios::Endpoint::UpdatePassword));

        assert!(matches!(
            build_runner(&settings, SuiteSelection::Login, transport),
            Err(CliError::Settings(SettingsError::MissingLoginUrl))
        ));
    }

    #[test]
    fn test_build_runner_with_login() {
        let settings = settings(Some("http://localhost:8081/login"));
        let transport = transport(&settings).unwrap();
        let runner = build_runner(&settings, SuiteSelection::Login, transport).unwrap();
        let scenarios = runner.scenarios(SuiteSelection::All);
        assert_eq!(scenarios.len(), 8);
    }
}
