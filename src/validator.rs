//! Per-element validation of `DataItem` references
//!
//! Each element goes through attribute resolution, legality checks, and, for
//! `Format="HDF"`, a comparison against the stored dataset:
//! - **Existence**: the container file and the dataset inside it
//! - **Type**: declared `NumberType`/`Precision` against the stored element type
//! - **Shape**: declared `Dimensions` against the stored extents
//!
//! Findings go to the [`DiagnosticSink`]; only malformed integer attributes
//! are returned as errors.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::container::{ContainerReader, DatasetLookup};
use crate::data_item::{DataItemElement, DataReference, Format, Resolution};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::Result;
use crate::locator::{Locator, parse_locator};

/// Validator for single `DataItem` elements
pub struct ReferenceValidator<'r> {
    reader: &'r dyn ContainerReader,
    /// Directory that relative container paths are resolved against
    container_base: Option<PathBuf>,
}

impl<'r> ReferenceValidator<'r> {
    /// Relative container paths resolve against the working directory
    pub fn new(reader: &'r dyn ContainerReader) -> Self {
        Self {
            reader,
            container_base: None,
        }
    }

    /// Resolve relative container paths against `base` instead
    pub fn with_container_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.container_base = Some(base.into());
        self
    }

    /// Check one element, reporting every finding to `sink`
    pub fn validate(
        &self,
        element: &DataItemElement<'_>,
        document: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<()> {
        let reference = match DataReference::resolve(element)? {
            Resolution::Resolved(reference) => reference,
            Resolution::MissingDimensions => {
                sink.report(document, element.line, Diagnostic::MissingDimensions);
                return Ok(());
            }
        };

        for violation in reference.legality_violations() {
            sink.report(document, reference.line, violation);
        }

        if reference.parsed_format() == Some(Format::Hdf) {
            self.check_dataset(&reference, document, sink);
        } else {
            sink.report(
                document,
                reference.line,
                Diagnostic::IgnoredFormat {
                    format: reference.format.to_string(),
                },
            );
        }

        Ok(())
    }

    /// Compare a resolved reference with the dataset it points to
    pub fn check_dataset(
        &self,
        reference: &DataReference<'_>,
        document: &Path,
        sink: &mut dyn DiagnosticSink,
    ) {
        let line = reference.line;

        let (container, dataset) = match parse_locator(reference.locator) {
            Locator::Parsed { container, dataset } => (container, dataset),
            Locator::Malformed => {
                sink.report(
                    document,
                    line,
                    Diagnostic::LocatorMismatch {
                        text: reference.locator.to_string(),
                    },
                );
                return;
            }
        };

        debug!(
            container,
            dataset,
            number_type = reference.number_type,
            precision = reference.precision,
            dimensions = ?reference.dimensions,
            "checking dataset"
        );

        let container_path = self.resolve_container(container);
        if !self.reader.exists(&container_path) {
            sink.report(
                document,
                line,
                Diagnostic::ContainerMissing {
                    container: container.to_string(),
                },
            );
            return;
        }

        let descriptor = match self.reader.describe(&container_path, dataset) {
            DatasetLookup::Found(descriptor) => descriptor,
            DatasetLookup::NotFound => {
                sink.report(
                    document,
                    line,
                    Diagnostic::DatasetNotFound {
                        dataset: dataset.to_string(),
                        container: container.to_string(),
                    },
                );
                return;
            }
            DatasetLookup::ContainerError(detail) => {
                sink.report(document, line, Diagnostic::ContainerError { detail });
                return;
            }
        };

        // UInt, Char and UChar have no expected tag and skip this comparison
        if let Some(expected) = reference.expected_type_tag()
            && expected != descriptor.element_type
        {
            sink.report(
                document,
                line,
                Diagnostic::TypeMismatch {
                    number_type: reference.number_type.to_string(),
                    precision: reference.precision,
                    actual: descriptor.element_type.clone(),
                },
            );
        }

        if reference.dimensions != descriptor.shape {
            sink.report(
                document,
                line,
                Diagnostic::ShapeMismatch {
                    declared: reference.dimensions.clone(),
                    actual: descriptor.shape,
                },
            );
        }
    }

    fn resolve_container(&self, container: &str) -> PathBuf {
        let path = Path::new(container);
        match &self.container_base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::DatasetDescriptor;
    use crate::diagnostics::DiagnosticRecord;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory containers keyed by `(container, dataset)`
    #[derive(Default)]
    struct FakeReader {
        containers: HashMap<PathBuf, HashMap<String, DatasetDescriptor>>,
        opened: RefCell<Vec<PathBuf>>,
    }

    impl FakeReader {
        fn with_dataset(
            mut self,
            container: &str,
            dataset: &str,
            element_type: &str,
            shape: &[u64],
        ) -> Self {
            self.containers
                .entry(PathBuf::from(container))
                .or_default()
                .insert(
                    dataset.to_string(),
                    DatasetDescriptor::new(element_type, shape.to_vec()),
                );
            self
        }
    }

    impl ContainerReader for FakeReader {
        fn exists(&self, container: &Path) -> bool {
            self.containers.contains_key(container)
        }

        fn describe(&self, container: &Path, dataset: &str) -> DatasetLookup {
            self.opened.borrow_mut().push(container.to_path_buf());
            match self.containers.get(container).and_then(|c| c.get(dataset)) {
                Some(descriptor) => DatasetLookup::Found(descriptor.clone()),
                None => DatasetLookup::NotFound,
            }
        }
    }

    fn hdf_item<'a>(
        number_type: &'a str,
        precision: &'a str,
        dims: &'a str,
        text: &'a str,
    ) -> DataItemElement<'a> {
        DataItemElement {
            line: 7,
            number_type: Some(number_type),
            precision: Some(precision),
            format: Some("HDF"),
            dimensions: Some(dims),
            text,
        }
    }

    fn run(reader: &FakeReader, element: DataItemElement<'_>) -> Vec<Diagnostic> {
        let mut sink: Vec<DiagnosticRecord> = Vec::new();
        ReferenceValidator::new(reader)
            .validate(&element, Path::new("doc.xmf"), &mut sink)
            .unwrap();
        sink.into_iter().map(|record| record.diagnostic).collect()
    }

    #[test]
    fn test_matching_dataset_is_silent() {
        let reader = FakeReader::default().with_dataset("run.h5", "/p", "float32", &[10, 10]);
        let diagnostics = run(&reader, hdf_item("Float", "4", "10 10", "run.h5:/p"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_type_mismatch_still_checks_shape() {
        let reader = FakeReader::default().with_dataset("run.h5", "/p", "float64", &[10, 5]);
        let diagnostics = run(&reader, hdf_item("Float", "4", "10 10", "run.h5:/p"));

        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::TypeMismatch {
                    number_type: "Float".to_string(),
                    precision: 4,
                    actual: "float64".to_string(),
                },
                Diagnostic::ShapeMismatch {
                    declared: vec![10, 10],
                    actual: vec![10, 5],
                },
            ]
        );
    }

    #[test]
    fn test_rank_mismatch_reported_once() {
        let reader = FakeReader::default().with_dataset("run.h5", "/p", "int32", &[100]);
        let diagnostics = run(&reader, hdf_item("Int", "4", "10 10", "run.h5:/p"));

        assert_eq!(
            diagnostics,
            vec![Diagnostic::ShapeMismatch {
                declared: vec![10, 10],
                actual: vec![100],
            }]
        );
    }

    #[test]
    fn test_uint_type_is_never_compared() {
        let reader = FakeReader::default().with_dataset("run.h5", "/ids", "float64", &[3]);
        let diagnostics = run(&reader, hdf_item("UInt", "4", "3", "run.h5:/ids"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_dataset_only() {
        let reader = FakeReader::default().with_dataset("run.h5", "/p", "float32", &[1]);
        let diagnostics = run(&reader, hdf_item("Float", "4", "1", "run.h5:/q"));

        assert_eq!(
            diagnostics,
            vec![Diagnostic::DatasetNotFound {
                dataset: "/q".to_string(),
                container: "run.h5".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_container_skips_lookup() {
        let reader = FakeReader::default();
        let diagnostics = run(&reader, hdf_item("Float", "4", "1", "gone.h5:/p"));

        assert_eq!(
            diagnostics,
            vec![Diagnostic::ContainerMissing {
                container: "gone.h5".to_string(),
            }]
        );
        assert!(reader.opened.borrow().is_empty());
    }

    #[test]
    fn test_malformed_locator() {
        let reader = FakeReader::default();
        let diagnostics = run(&reader, hdf_item("Float", "4", "1", "run.h5"));

        assert_eq!(
            diagnostics,
            vec![Diagnostic::LocatorMismatch {
                text: "run.h5".to_string(),
            }]
        );
    }

    #[test]
    fn test_locator_text_is_trimmed() {
        let reader = FakeReader::default().with_dataset("run.h5", "/p", "float32", &[2]);
        let diagnostics = run(&reader, hdf_item("Float", "4", "2", "\n    run.h5:/p\n  "));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_defaults_are_ignored_as_xml() {
        let reader = FakeReader::default().with_dataset("file.h5", "/data", "float32", &[4, 4]);
        let element = DataItemElement {
            line: 3,
            dimensions: Some("4 4"),
            text: "file.h5:/data",
            ..Default::default()
        };
        let diagnostics = run(&reader, element);

        assert_eq!(
            diagnostics,
            vec![Diagnostic::IgnoredFormat {
                format: "XML".to_string(),
            }]
        );
        assert!(reader.opened.borrow().is_empty());
    }

    #[test]
    fn test_invalid_format_is_reported_and_ignored() {
        let reader = FakeReader::default();
        let element = DataItemElement {
            format: Some("NetCDF"),
            dimensions: Some("1"),
            ..Default::default()
        };

        assert_eq!(
            run(&reader, element),
            vec![
                Diagnostic::InvalidFormat {
                    value: "NetCDF".to_string(),
                },
                Diagnostic::IgnoredFormat {
                    format: "NetCDF".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_precision_violation_does_not_stop_dataset_check() {
        let reader = FakeReader::default().with_dataset("run.h5", "/p", "float16", &[2]);
        let diagnostics = run(&reader, hdf_item("Float", "2", "2", "run.h5:/p"));

        assert_eq!(diagnostics[0], Diagnostic::PrecisionTwoNotAllowed);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_missing_dimensions_stops_processing() {
        let reader = FakeReader::default();
        let element = DataItemElement {
            number_type: Some("Bogus"),
            format: Some("HDF"),
            text: "run.h5:/p",
            ..Default::default()
        };

        assert_eq!(run(&reader, element), vec![Diagnostic::MissingDimensions]);
    }

    #[test]
    fn test_container_error_is_reported() {
        struct BrokenReader;
        impl ContainerReader for BrokenReader {
            fn exists(&self, _container: &Path) -> bool {
                true
            }
            fn describe(&self, _container: &Path, _dataset: &str) -> DatasetLookup {
                DatasetLookup::ContainerError("truncated superblock".to_string())
            }
        }

        let mut sink: Vec<DiagnosticRecord> = Vec::new();
        ReferenceValidator::new(&BrokenReader)
            .validate(
                &hdf_item("Float", "4", "1", "bad.h5:/p"),
                Path::new("doc.xmf"),
                &mut sink,
            )
            .unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink[0].to_string(),
            "(doc.xmf:7) Exception during HDF5 processing: truncated superblock"
        );
    }

    #[test]
    fn test_container_base_resolution() {
        let reader = FakeReader::default().with_dataset("/data/run.h5", "/p", "float32", &[1]);
        let mut sink: Vec<DiagnosticRecord> = Vec::new();

        ReferenceValidator::new(&reader)
            .with_container_base("/data")
            .validate(
                &hdf_item("Float", "4", "1", "run.h5:/p"),
                Path::new("/data/doc.xmf"),
                &mut sink,
            )
            .unwrap();

        assert!(sink.is_empty());
        assert_eq!(reader.opened.borrow()[0], PathBuf::from("/data/run.h5"));
    }
}
