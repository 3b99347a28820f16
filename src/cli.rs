use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show defects
    Quiet,
    /// Show every diagnostic
    #[default]
    Normal,
    /// Show diagnostics, dataset checks and a summary
    Verbose,
    /// Show all available debugging information
    Debug,
}

/// Diagnostic output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `(<document>:<line>) <message>` lines
    #[default]
    Human,
    /// One JSON object per diagnostic
    Json,
}

/// Check an Xdmf document against the HDF5 datasets it references
#[derive(Parser, Debug, Clone)]
#[command(name = "xdmf-check")]
#[command(about = "Check Xdmf DataItem elements against the HDF5 datasets they reference")]
#[command(version)]
#[command(
    after_help = "Datasets are only read when built with the `hdf5` feature. Other builds \
                  report every existing container as an HDF5 processing error."
)]
pub struct Cli {
    /// Xdmf document to check
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (`-vv` for debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report defects
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Quiet mode",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Exit with status 1 when any defect was reported
    #[arg(long = "fail-on-defects")]
    pub fail_on_defects: bool,

    /// Resolve relative container paths against the document's directory
    #[arg(long = "relative-to-document")]
    pub relative_to_document: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        match (self.quiet, self.verbose) {
            (true, _) => VerbosityLevel::Quiet,
            (false, 0) => VerbosityLevel::Normal,
            (false, 1) => VerbosityLevel::Verbose,
            (false, _) => VerbosityLevel::Debug,
        }
    }
}
