//! Diagnostic Output and Reporting
//!
//! This module renders diagnostics and the per-document summary.

use std::io::{self, Write};
use std::path::Path;

use crate::checker::CheckSummary;
use crate::cli::{OutputFormat, VerbosityLevel};
use crate::diagnostics::{Diagnostic, DiagnosticRecord, DiagnosticSink};

/// Output formatter for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbosity: VerbosityLevel,
    format: OutputFormat,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel, format: OutputFormat) -> Self {
        Self {
            verbosity,
            format,
            show_colors: atty::is(atty::Stream::Stdout),
        }
    }

    pub fn with_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    /// Whether this diagnostic is printed at the current verbosity
    pub fn shows(&self, diagnostic: &Diagnostic) -> bool {
        self.verbosity != VerbosityLevel::Quiet || diagnostic.is_defect()
    }

    pub fn format_record(&self, record: &DiagnosticRecord) -> String {
        match self.format {
            OutputFormat::Human => {
                let location = format!("({}:{})", record.document.display(), record.line);
                let color = if record.diagnostic.is_defect() { "31" } else { "36" };
                format!("{} {}", self.colorize(&location, color), record.diagnostic)
            }
            OutputFormat::Json => {
                let mut value = serde_json::to_value(record).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert(
                        "message".to_string(),
                        serde_json::Value::String(record.diagnostic.to_string()),
                    );
                }
                value.to_string()
            }
        }
    }

    /// Summary shown after the diagnostics, if any at this verbosity
    pub fn format_summary(&self, document: &Path, summary: &CheckSummary) -> Option<String> {
        if self.verbosity < VerbosityLevel::Verbose {
            return None;
        }

        match self.format {
            OutputFormat::Human => {
                let mut output = String::new();
                output.push_str(&format!("Check Summary for {}:\n", document.display()));
                output.push_str(&format!("  DataItem elements: {}\n", summary.elements));
                let defects = format!("Defects: {}", summary.defects);
                let color = if summary.has_defects() { "31" } else { "32" };
                output.push_str(&format!("  {}\n", self.colorize(&defects, color)));
                output.push_str(&format!("  Ignored: {}", summary.ignored));
                Some(output)
            }
            OutputFormat::Json => Some(
                serde_json::json!({
                    "document": document,
                    "summary": summary,
                })
                .to_string(),
            ),
        }
    }
}

/// Sink that writes each diagnostic as soon as it is reported
pub struct OutputSink<W: Write> {
    output: Output,
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> OutputSink<W> {
    pub fn new(output: Output, writer: W) -> Self {
        Self {
            output,
            writer,
            error: None,
        }
    }

    /// Write a line unless an earlier write already failed
    pub fn write_line(&mut self, line: &str) {
        if self.error.is_none()
            && let Err(e) = writeln!(self.writer, "{}", line)
        {
            self.error = Some(e);
        }
    }

    /// Flush and surface the first write error
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> DiagnosticSink for OutputSink<W> {
    fn report(&mut self, document: &Path, line: u32, diagnostic: Diagnostic) {
        if !self.output.shows(&diagnostic) {
            return;
        }
        let record = DiagnosticRecord::new(document, line, diagnostic);
        let text = self.output.format_record(&record);
        self.write_line(&text);
    }
}
