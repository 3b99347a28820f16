//! Element-local diagnostics
//!
//! Every problem found while checking a `DataItem` element is a [`Diagnostic`]
//! handed to a [`DiagnosticSink`] together with the document path and the
//! source line. Diagnostics never abort the check of the remaining elements.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One finding about a single `DataItem` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The mandatory `Dimensions` attribute is absent
    MissingDimensions,
    /// `NumberType` is outside Float/Int/UInt/Char/UChar
    InvalidNumberType { value: String },
    /// `Precision` is outside 1/2/4/8
    InvalidPrecision { value: i128 },
    /// `Precision="2"` on a number type other than Int/UInt
    PrecisionTwoNotAllowed,
    /// `Format` is outside XML/HDF/Binary
    InvalidFormat { value: String },
    /// Element not checked against a container because its format is not HDF
    IgnoredFormat { format: String },
    /// Element text is not `<container>:/<dataset>`
    LocatorMismatch { text: String },
    ContainerMissing { container: String },
    DatasetNotFound { dataset: String, container: String },
    TypeMismatch {
        number_type: String,
        precision: i128,
        actual: String,
    },
    ShapeMismatch { declared: Vec<u64>, actual: Vec<u64> },
    /// Opening or reading the container failed
    ContainerError { detail: String },
}

impl Diagnostic {
    /// Everything except an ignored element counts as a defect
    pub fn is_defect(&self) -> bool {
        !matches!(self, Diagnostic::IgnoredFormat { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingDimensions => write!(f, "no dimensions in DataItem element!"),
            Diagnostic::InvalidNumberType { value } => {
                write!(f, "Invalid NumberType \"{}\" specified", value)
            }
            Diagnostic::InvalidPrecision { value } => {
                write!(f, "Invalid Precision {} specified", value)
            }
            Diagnostic::PrecisionTwoNotAllowed => write!(
                f,
                "Precision 2 only allowed for NumberType \"Int\" and \"UInt\""
            ),
            Diagnostic::InvalidFormat { value } => {
                write!(f, "Invalid Format \"{}\" specified", value)
            }
            Diagnostic::IgnoredFormat { format } => {
                write!(f, "Ignoring DataItem element having format \"{}\"", format)
            }
            Diagnostic::LocatorMismatch { text } => {
                write!(f, "Failed to match file:dataset pattern in \"{}\"", text)
            }
            Diagnostic::ContainerMissing { container } => {
                write!(f, "Referenced HDF5 file {} does not exist", container)
            }
            Diagnostic::DatasetNotFound { dataset, container } => write!(
                f,
                "Dataset \"{}\" not found in HDF5 file {}",
                dataset, container
            ),
            Diagnostic::TypeMismatch {
                number_type,
                precision,
                actual,
            } => write!(
                f,
                "Data types in Xdmf ({}, {}) and HDF5 file ({}) don't match",
                number_type, precision, actual
            ),
            Diagnostic::ShapeMismatch { declared, actual } => write!(
                f,
                "Dimensions in Xdmf {} and HDF5 file {} don't match",
                format_extents(declared),
                format_extents(actual)
            ),
            Diagnostic::ContainerError { detail } => {
                write!(f, "Exception during HDF5 processing: {}", detail)
            }
        }
    }
}

/// Render extents as a tuple: `(10, 5)`, `(7,)`, `()`
pub fn format_extents(extents: &[u64]) -> String {
    match extents {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        _ => {
            let parts: Vec<String> = extents.iter().map(|e| e.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Receiver of element-local diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, document: &Path, line: u32, diagnostic: Diagnostic);
}

/// A diagnostic tied to its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    pub document: PathBuf,
    pub line: u32,
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl DiagnosticRecord {
    pub fn new(document: &Path, line: u32, diagnostic: Diagnostic) -> Self {
        Self {
            document: document.to_path_buf(),
            line,
            diagnostic,
        }
    }
}

impl fmt::Display for DiagnosticRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}:{}) {}",
            self.document.display(),
            self.line,
            self.diagnostic
        )
    }
}

impl DiagnosticSink for Vec<DiagnosticRecord> {
    fn report(&mut self, document: &Path, line: u32, diagnostic: Diagnostic) {
        self.push(DiagnosticRecord::new(document, line, diagnostic));
    }
}
