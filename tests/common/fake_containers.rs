use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use xdmf_check::{ContainerReader, DatasetDescriptor, DatasetLookup};

/// In-memory stand-in for HDF5 files
///
/// Containers registered here exist; everything else does not. Every
/// `describe` call is logged so tests can check how often containers were
/// opened.
#[derive(Default)]
pub struct FakeContainers {
    containers: HashMap<PathBuf, FakeContainer>,
    opened: RefCell<Vec<(PathBuf, String)>>,
}

enum FakeContainer {
    Datasets(HashMap<String, DatasetDescriptor>),
    Corrupt(String),
}

impl FakeContainers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(
        mut self,
        container: impl AsRef<Path>,
        dataset: &str,
        element_type: &str,
        shape: &[u64],
    ) -> Self {
        let entry = self
            .containers
            .entry(container.as_ref().to_path_buf())
            .or_insert_with(|| FakeContainer::Datasets(HashMap::new()));
        if let FakeContainer::Datasets(datasets) = entry {
            datasets.insert(
                dataset.to_string(),
                DatasetDescriptor::new(element_type, shape.to_vec()),
            );
        }
        self
    }

    pub fn with_corrupt(mut self, container: impl AsRef<Path>, detail: &str) -> Self {
        self.containers.insert(
            container.as_ref().to_path_buf(),
            FakeContainer::Corrupt(detail.to_string()),
        );
        self
    }

    pub fn opened(&self) -> Vec<(PathBuf, String)> {
        self.opened.borrow().clone()
    }
}

impl ContainerReader for FakeContainers {
    fn exists(&self, container: &Path) -> bool {
        self.containers.contains_key(container)
    }

    fn describe(&self, container: &Path, dataset: &str) -> DatasetLookup {
        self.opened
            .borrow_mut()
            .push((container.to_path_buf(), dataset.to_string()));

        match self.containers.get(container) {
            Some(FakeContainer::Datasets(datasets)) => match datasets.get(dataset) {
                Some(descriptor) => DatasetLookup::Found(descriptor.clone()),
                None => DatasetLookup::NotFound,
            },
            Some(FakeContainer::Corrupt(detail)) => DatasetLookup::ContainerError(detail.clone()),
            None => DatasetLookup::ContainerError(format!(
                "unable to open file {}",
                container.display()
            )),
        }
    }
}
