//! Access to the datasets stored in referenced containers
//!
//! The validator only sees the [`ContainerReader`] trait. The HDF5 backend lives
//! in [`crate::hdf5_reader`] behind the `hdf5` cargo feature; without it,
//! [`UnavailableReader`] reports every lookup as a container error so that the
//! remaining checks still run.

use std::path::Path;

/// Element type and shape of a stored dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDescriptor {
    /// Numeric kind and bit width, e.g. `float32`, `int64`, `uint8`
    pub element_type: String,
    pub shape: Vec<u64>,
}

impl DatasetDescriptor {
    pub fn new(element_type: impl Into<String>, shape: Vec<u64>) -> Self {
        Self {
            element_type: element_type.into(),
            shape,
        }
    }
}

/// Outcome of looking up one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLookup {
    Found(DatasetDescriptor),
    NotFound,
    ContainerError(String),
}

/// Read-only access to dataset metadata inside containers
///
/// Every call to [`describe`](ContainerReader::describe) opens the container
/// and closes it before returning.
pub trait ContainerReader {
    /// Whether the container file exists on disk
    fn exists(&self, container: &Path) -> bool {
        container.exists()
    }

    fn describe(&self, container: &Path, dataset: &str) -> DatasetLookup;
}

/// Reader used when the crate is built without HDF5 support
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableReader;

impl ContainerReader for UnavailableReader {
    fn describe(&self, container: &Path, _dataset: &str) -> DatasetLookup {
        DatasetLookup::ContainerError(format!(
            "cannot open {}: built without HDF5 support (enable the `hdf5` feature)",
            container.display()
        ))
    }
}

/// The reader selected at build time
///
/// Without the `hdf5` feature this logs a warning, since no dataset can be
/// compared against its container.
pub fn default_reader() -> Box<dyn ContainerReader> {
    #[cfg(feature = "hdf5")]
    {
        Box::new(crate::hdf5_reader::Hdf5Reader::new())
    }
    #[cfg(not(feature = "hdf5"))]
    {
        tracing::warn!(
            "built without the `hdf5` feature: existing containers cannot be read and \
             are reported as HDF5 processing errors"
        );
        Box::new(UnavailableReader)
    }
}
