//! # Nuclide Explorer
//!
//! Interactive exploration of nuclear property tables - a Rust web service
//! that plots AME, FRDM and Mass Explorer datasets as a chart of nuclides
//! and a linked scatter plot.
//!
//! ## Features
//!
//! - **Dataset loading**: CSV tables and multi-sheet workbooks
//! - **Chart synthesis**: chart of nuclides with magic number bands, scatter plots
//! - **Reactive controller**: an explicit dependency graph recomputes only what changed
//! - **Linked selection**: points selected on the scatter plot highlight on the chart of nuclides
//!
//! ## Modules
//!
//! - [`dataset`]: Dataset model, loaders and the registry
//! - [`chart`]: Chart specifications built from datasets
//! - [`explore`]: Dependency graph, controller and sessions
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nuclide_explorer::dataset::{builtin_sources, DatasetRegistry};
//! use nuclide_explorer::explore::{Controller, InputChange};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(DatasetRegistry::load(&builtin_sources())?);
//!     let controller = Controller::new(registry)?;
//!
//!     // Start on the first dataset with its default axes
//!     let mut state = controller.initial_state(None)?;
//!
//!     // Colour the scatter plot by mass excess
//!     let update = controller.apply(
//!         &mut state,
//!         InputChange::Color { value: Some("Mass Excess".to_string()) },
//!     )?;
//!
//!     println!("Recomputed {:?}", update.recomputed);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod explore;

// Re-export top-level types for convenience
pub use dataset::{
    AxisSelection, Dataset, DatasetDefaults, DatasetEntry, DatasetError, DatasetRegistry,
    DatasetResult, DatasetSource, PointSelection,
};

pub use chart::{ChartKind, ChartSpec, FieldOption, Overlay, Region};

pub use explore::{
    Controller, ControllerError, DependencyGraph, ExploreState, InputChange, Node, NodeValue,
    SessionStore, Update,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
