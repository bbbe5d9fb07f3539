//! Authprobe - Main Entry Point
//!
//! Loads settings, runs the selected suites and prints the report. Exits
//! with 1 when a scenario did not pass and 2 when the run could not start.

use std::process::ExitCode;

use authprobe::cli::{self, CliArgs, CliError, ReportFormat};
use authprobe::SuiteReport;
use authprobe_infrastructure::{ApiSettings, logging};
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = logging::init(logging::DEFAULT_DIRECTIVE) {
        eprintln!("failed to initialise logging: {err}");
    }

    let args = CliArgs::parse();

    match run(args).await {
        Ok(report) => {
            print_report(&report, args.format());
            if report.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!(error = %err, "suite could not start");
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: CliArgs) -> Result<SuiteReport, CliError> {
    let settings = ApiSettings::load()?;
    info!(
        base_url = %settings.base_url,
        login_url = settings.login_url.as_deref().unwrap_or("-"),
        "settings loaded"
    );

    let runner = cli::build_runner(&settings, args.selection, cli::transport(&settings)?)?
        .with_stop_on_failure(args.fail_fast);
    Ok(runner.run(args.selection).await)
}

fn print_report(report: &SuiteReport, format: ReportFormat) {
    match format {
        ReportFormat::Text => println!("{report}"),
        ReportFormat::Json => match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(err) => error!(error = %err, "failed to serialize report"),
        },
    }
}
