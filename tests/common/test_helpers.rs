use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xdmf_check::{
    CheckOptions, CheckSummary, Checker, ContainerReader, Diagnostic, DiagnosticRecord,
    error::Result,
};

/// Wrap `DataItem` markup in a minimal Xdmf 2 document
///
/// The first `DataItem` line of `body` lands on line 4 of the document.
pub fn xdmf_document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" ?>\n<Xdmf Version=\"2.0\">\n<Domain>\n{}\n</Domain>\n</Xdmf>\n",
        body
    )
}

/// Write a document into `dir` and return its path
pub fn write_document(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write test document");
    path
}

/// Run a full check and collect everything reported
pub fn check_with(
    reader: &dyn ContainerReader,
    options: CheckOptions,
    path: &Path,
) -> (Vec<DiagnosticRecord>, Result<CheckSummary>) {
    let mut records: Vec<DiagnosticRecord> = Vec::new();
    let result = Checker::new(reader, options).check_file(path, &mut records);
    (records, result)
}

/// Run a check of in-memory document text
pub fn check_text(
    reader: &dyn ContainerReader,
    text: &str,
) -> (Vec<DiagnosticRecord>, Result<CheckSummary>) {
    let mut records: Vec<DiagnosticRecord> = Vec::new();
    let result = Checker::new(reader, CheckOptions::default()).check_text(
        Path::new("test.xmf"),
        text,
        &mut records,
    );
    (records, result)
}

pub fn diagnostics(records: &[DiagnosticRecord]) -> Vec<Diagnostic> {
    records.iter().map(|record| record.diagnostic.clone()).collect()
}

pub fn rendered(records: &[DiagnosticRecord]) -> Vec<String> {
    records.iter().map(|record| record.to_string()).collect()
}
