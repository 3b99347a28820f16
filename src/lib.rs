//! # xdmf-check Library
//!
//! Checks the `DataItem` elements of an Xdmf document against the HDF5
//! datasets they reference: existence, element type and shape. Every
//! mismatch is reported as a diagnostic tied to the element's source line.

pub mod checker;
pub mod cli;
pub mod config;
pub mod container;
pub mod data_item;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod error_reporter;
#[cfg(feature = "hdf5")]
pub mod hdf5_reader;
pub mod locator;
pub mod output;
pub mod validator;

pub use checker::{CheckOptions, CheckSummary, Checker};
pub use cli::{Cli, OutputFormat, VerbosityLevel};
pub use config::{Config, ConfigManager, EnvProvider};
pub use container::{
    ContainerReader, DatasetDescriptor, DatasetLookup, UnavailableReader, default_reader,
};
pub use data_item::{DataItemElement, DataReference, Format, NumberType, Resolution};
pub use diagnostics::{Diagnostic, DiagnosticRecord, DiagnosticSink};
pub use document::{XdmfDocument, read_document};
pub use error::{CheckError, ConfigError};
pub use error_reporter::ErrorReporter;
#[cfg(feature = "hdf5")]
pub use hdf5_reader::Hdf5Reader;
pub use locator::{Locator, parse_locator};
pub use output::{Output, OutputSink};
pub use validator::ReferenceValidator;
