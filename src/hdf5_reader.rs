//! HDF5 container backend

use std::path::Path;

use hdf5::types::TypeDescriptor;
use tracing::debug;

use crate::container::{ContainerReader, DatasetDescriptor, DatasetLookup};

/// Opens the container read-only on every lookup; the handle is dropped, and
/// the file closed, before `describe` returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct Hdf5Reader;

impl Hdf5Reader {
    pub fn new() -> Self {
        Self
    }
}

impl ContainerReader for Hdf5Reader {
    fn describe(&self, container: &Path, dataset: &str) -> DatasetLookup {
        let file = match hdf5::File::open(container) {
            Ok(file) => file,
            Err(e) => return DatasetLookup::ContainerError(e.to_string()),
        };
        debug!(container = %container.display(), dataset, "opened HDF5 file");

        if !file.link_exists(dataset) {
            return DatasetLookup::NotFound;
        }

        let result = file.dataset(dataset).and_then(|ds| {
            let descriptor = ds.dtype()?.to_descriptor()?;
            let shape = ds.shape().into_iter().map(|extent| extent as u64).collect();
            Ok(DatasetDescriptor::new(type_tag(&descriptor), shape))
        });

        match result {
            Ok(descriptor) => DatasetLookup::Found(descriptor),
            Err(e) => DatasetLookup::ContainerError(e.to_string()),
        }
    }
}

/// Map a stored datatype onto the `int32` / `uint8` / `float64` vocabulary
pub fn type_tag(descriptor: &TypeDescriptor) -> String {
    let bits = descriptor.size() * 8;
    match descriptor {
        TypeDescriptor::Integer(_) => format!("int{}", bits),
        TypeDescriptor::Unsigned(_) => format!("uint{}", bits),
        TypeDescriptor::Float(_) => format!("float{}", bits),
        TypeDescriptor::Boolean => "bool".to_string(),
        other => format!("{:?}", other),
    }
}
