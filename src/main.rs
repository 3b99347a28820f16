use std::io;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use xdmf_check::{
    CheckError, CheckOptions, Checker, Cli, Config, ConfigManager, ErrorReporter, Output, OutputSink,
    VerbosityLevel, default_reader,
};

/// Exit status for a missing document or a non-Xdmf root (`-1`)
const DOCUMENT_REJECTED: u8 = 255;
/// Exit status for defects when `fail_on_defects` is enabled
const DEFECTS_FOUND: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let mut verbosity = cli.verbosity();

    let result = ConfigManager::load_config(&cli)
        .map_err(CheckError::from)
        .map_err(anyhow::Error::from)
        .and_then(|config| {
            if verbosity != VerbosityLevel::Debug {
                verbosity = config.verbosity();
            }
            init_logging(verbosity);
            run(&cli, &config, verbosity)
        });

    match result {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<CheckError>() {
            Some(check_error) => {
                ErrorReporter::new(verbosity).report(check_error);
                if check_error.is_document_rejection() {
                    ExitCode::from(DOCUMENT_REJECTED)
                } else {
                    ExitCode::FAILURE
                }
            }
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: &Cli, config: &Config, verbosity: VerbosityLevel) -> anyhow::Result<ExitCode> {
    let mut output = Output::new(verbosity, config.output.format);
    if !config.output.color {
        output = output.with_colors(false);
    }

    let reader = default_reader();
    let checker = Checker::new(
        reader.as_ref(),
        CheckOptions {
            relative_to_document: config.check.relative_to_document,
        },
    );

    let mut sink = OutputSink::new(output, io::stdout().lock());
    let checked = checker.check_file(&cli.document, &mut sink);

    if let Ok(summary) = &checked
        && let Some(text) = output.format_summary(&cli.document, summary)
    {
        sink.write_line(&text);
    }
    sink.finish().context("failed to write diagnostics")?;

    let summary = checked?;
    if config.check.fail_on_defects && summary.has_defects() {
        return Ok(ExitCode::from(DEFECTS_FOUND));
    }
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbosity: VerbosityLevel) {
    let default_filter = match verbosity {
        VerbosityLevel::Quiet => "xdmf_check=error",
        VerbosityLevel::Normal => "xdmf_check=warn",
        VerbosityLevel::Verbose => "xdmf_check=debug",
        VerbosityLevel::Debug => "xdmf_check=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
