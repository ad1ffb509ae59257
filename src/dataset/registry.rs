//! Dataset Registry
//!
//! Owns every dataset for the lifetime of the process. Built once at
//! start-up, then shared read-only (behind an `Arc`) with the HTTP layer
//! and the explore controller.

use std::collections::HashMap;

use super::catalog::{DatasetDefaults, DatasetSource};
use super::error::{DatasetError, DatasetResult};
use super::loader::load_source;
use super::types::{AxisSelection, Dataset, NEUTRON_FIELD, PROTON_FIELD};

/// A loaded dataset together with its presentation metadata
#[derive(Debug, Clone)]
pub struct DatasetEntry {
    pub dataset: Dataset,
    pub label_field: String,
    pub defaults: DatasetDefaults,
}

impl DatasetEntry {
    pub fn new(dataset: Dataset, label_field: impl Into<String>, defaults: DatasetDefaults) -> Self {
        Self {
            dataset,
            label_field: label_field.into(),
            defaults,
        }
    }

    /// Check that the required columns and every default name real fields
    fn validate(&self) -> DatasetResult<()> {
        let ds = &self.dataset;
        for column in [NEUTRON_FIELD, PROTON_FIELD, self.label_field.as_str()] {
            if !ds.has_field(column) {
                return Err(DatasetError::MissingColumn {
                    dataset: ds.name().to_string(),
                    column: column.to_string(),
                });
            }
        }

        let d = &self.defaults;
        let named = [Some(&d.x), Some(&d.y), d.color.as_ref(), d.nuclide_color.as_ref()];
        for field in named.into_iter().flatten() {
            if !ds.has_field(field) {
                return Err(DatasetError::UnknownField {
                    dataset: ds.name().to_string(),
                    field: field.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Read-only mapping from dataset name to dataset
#[derive(Debug, Default)]
pub struct DatasetRegistry {
    /// Dataset names in catalog order
    order: Vec<String>,
    entries: HashMap<String, DatasetEntry>,
}

impl DatasetRegistry {
    /// Load every source. Any failure aborts the whole load.
    pub fn load(sources: &[DatasetSource]) -> DatasetResult<Self> {
        let mut entries = Vec::new();
        for source in sources {
            tracing::info!(source = %source.name, path = ?source.path, "Reading dataset source");
            for dataset in load_source(source)? {
                entries.push(DatasetEntry::new(
                    dataset,
                    source.label_field.clone(),
                    source.defaults.clone(),
                ));
            }
        }

        let registry = Self::from_datasets(entries)?;
        tracing::info!(datasets = registry.len(), "Dataset registry ready");
        Ok(registry)
    }

    /// Build a registry from in-memory datasets, applying the same
    /// validation as `load`
    pub fn from_datasets(entries: Vec<DatasetEntry>) -> DatasetResult<Self> {
        let mut registry = Self::default();
        for entry in entries {
            entry.validate()?;
            let name = entry.dataset.name().to_string();
            if registry.entries.contains_key(&name) {
                return Err(DatasetError::Duplicate(name));
            }
            registry.order.push(name.clone());
            registry.entries.insert(name, entry);
        }
        Ok(registry)
    }

    /// Dataset names in dropdown order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The dataset shown when a session starts
    pub fn first(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> DatasetResult<&DatasetEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| DatasetError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> DatasetResult<&Dataset> {
        self.entry(name).map(|e| &e.dataset)
    }

    /// Ordered field names of a dataset
    pub fn fields(&self, name: &str) -> DatasetResult<&[String]> {
        self.get(name).map(Dataset::fields)
    }

    /// Field used to identify nuclides on hover
    pub fn element_label_field(&self, name: &str) -> DatasetResult<&str> {
        self.entry(name).map(|e| e.label_field.as_str())
    }

    /// Default scatter chart axes
    pub fn default_axes(&self, name: &str) -> DatasetResult<AxisSelection> {
        self.entry(name).map(|e| e.defaults.axes())
    }

    /// Default colour field of the chart of nuclides
    pub fn default_color_field(&self, name: &str) -> DatasetResult<Option<&str>> {
        self.entry(name).map(|e| e.defaults.nuclide_color.as_deref())
    }
}
