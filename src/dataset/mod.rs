//! Nuclide dataset layer
//!
//! Loads the tabular nuclear-property sources once at start-up and
//! exposes them through a read-only `DatasetRegistry`.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod registry;
pub mod types;

pub use catalog::{builtin_sources, DatasetDefaults, DatasetSource, SourceFormat};
pub use error::{DatasetError, DatasetResult};
pub use loader::{load_csv, load_source, read_csv};
pub use registry::{DatasetEntry, DatasetRegistry};
pub use types::{
    AxisSelection, Cell, Column, Coord, Dataset, PointSelection, MISSING_TOKENS, NEUTRON_FIELD,
    PROTON_FIELD,
};
