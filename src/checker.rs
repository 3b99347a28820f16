//! Checking a whole Xdmf document

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::container::ContainerReader;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::document::{XdmfDocument, read_document};
use crate::error::Result;
use crate::validator::ReferenceValidator;

/// Options that change how a document is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Resolve relative container paths against the document's directory
    pub relative_to_document: bool,
}

/// Counts gathered while checking one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    /// `DataItem` elements visited
    pub elements: usize,
    /// Diagnostics that count as defects
    pub defects: usize,
    /// Elements skipped because their format is not HDF
    pub ignored: usize,
}

impl CheckSummary {
    pub fn has_defects(&self) -> bool {
        self.defects > 0
    }
}

/// Forwards diagnostics while counting them
struct Tally<'s> {
    inner: &'s mut dyn DiagnosticSink,
    summary: CheckSummary,
}

impl DiagnosticSink for Tally<'_> {
    fn report(&mut self, document: &Path, line: u32, diagnostic: Diagnostic) {
        if diagnostic.is_defect() {
            self.summary.defects += 1;
        } else {
            self.summary.ignored += 1;
        }
        self.inner.report(document, line, diagnostic);
    }
}

/// Drives the document walker and the reference validator
pub struct Checker<'r> {
    reader: &'r dyn ContainerReader,
    options: CheckOptions,
}

impl<'r> Checker<'r> {
    pub fn new(reader: &'r dyn ContainerReader, options: CheckOptions) -> Self {
        Self { reader, options }
    }

    /// Check every `DataItem` of the document at `path`
    ///
    /// Fails only when the document itself is unusable or an integer attribute
    /// is malformed; all other findings go to `sink`.
    pub fn check_file(&self, path: &Path, sink: &mut dyn DiagnosticSink) -> Result<CheckSummary> {
        let text = read_document(path)?;
        self.check_text(path, &text, sink)
    }

    /// Check a document already read into memory; `path` is used for diagnostics
    pub fn check_text(
        &self,
        path: &Path,
        text: &str,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<CheckSummary> {
        let document = XdmfDocument::parse(path, text)?;
        info!(document = %path.display(), "checking Xdmf document");

        let mut validator = ReferenceValidator::new(self.reader);
        if self.options.relative_to_document {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            validator = validator.with_container_base(base);
        }

        let mut tally = Tally {
            inner: sink,
            summary: CheckSummary::default(),
        };

        for element in document.data_items() {
            tally.summary.elements += 1;
            validator.validate(&element, document.path(), &mut tally)?;
        }

        info!(
            elements = tally.summary.elements,
            defects = tally.summary.defects,
            "finished Xdmf document"
        );
        Ok(tally.summary)
    }
}
