//! Explore view controller
//!
//! The explore view is modelled as an explicit dependency graph of pure
//! derived values. User interactions set input nodes; the `Controller`
//! recomputes the affected region of the graph in topological order.
//! Each browser session owns its own `ExploreState` in the `SessionStore`.
//!
//! # Example
//!
//! ```rust,ignore
//! use nuclide_explorer::explore::{Controller, InputChange};
//!
//! let controller = Controller::new(registry)?;
//! let mut state = controller.initial_state(Some("AME 16 Mass"))?;
//! let update = controller.apply(&mut state, InputChange::Dataset { value: "FRDM 2012".into() })?;
//! assert_eq!(state.axes.x, "Emic");
//! ```

pub mod controller;
pub mod error;
pub mod graph;
pub mod sessions;
pub mod state;

pub use controller::{Controller, Update};
pub use error::{ControllerError, ControllerResult, SessionError};
pub use graph::{explore_nodes, DependencyGraph, GraphError, Node, NodeSpec};
pub use sessions::{Session, SessionConfig, SessionId, SessionStore};
pub use state::{ExploreState, InputChange, NodeValue};
