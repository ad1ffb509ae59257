//! Explore Controller
//!
//! Applies user interactions to a session's `ExploreState` by walking the
//! dependency graph. A node is recomputed only when one of its upstream
//! nodes changed during the current pass, and a recomputed node whose value
//! did not change stops propagation.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::chart::{field_options, nuclide_chart, rows_in_region, scatter_chart, Region};
use crate::dataset::{DatasetRegistry, PointSelection};

use super::error::{ControllerError, ControllerResult};
use super::graph::{DependencyGraph, Node};
use super::state::{ExploreState, InputChange};

/// Outcome of one input change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Update {
    /// Derived nodes recomputed, in traversal order
    pub recomputed: Vec<Node>,
    /// Nodes whose value changed, starting with the input node
    pub changed: Vec<Node>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Recomputes explore state against the shared dataset registry
pub struct Controller {
    registry: Arc<DatasetRegistry>,
    graph: DependencyGraph,
}

impl Controller {
    pub fn new(registry: Arc<DatasetRegistry>) -> ControllerResult<Self> {
        Ok(Self {
            registry,
            graph: DependencyGraph::explore()?,
        })
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Fresh state for `dataset` (or the first dataset), every node computed
    pub fn initial_state(&self, dataset: Option<&str>) -> ControllerResult<ExploreState> {
        let dataset = match dataset {
            Some(name) => {
                self.check_dataset(name)?;
                name
            }
            None => self.registry.first().ok_or(ControllerError::NoDatasets)?,
        };

        let mut state = ExploreState::blank(dataset);
        for &node in self.graph.order() {
            if !self.graph.upstream(node).is_empty() {
                self.recompute(node, &mut state)?;
            }
        }
        Ok(state)
    }

    /// Apply one interaction and propagate it through the graph
    pub fn apply(&self, state: &mut ExploreState, change: InputChange) -> ControllerResult<Update> {
        let input = change.node();
        let mut update = Update::default();

        if !self.set_input(state, change)? {
            tracing::debug!(node = %input, "Input unchanged, nothing to recompute");
            return Ok(update);
        }
        update.changed.push(input);

        // Only nodes reachable from the input can change
        let mut dirty = HashSet::from([input]);
        for node in self.graph.affected_by(input) {
            if !self.graph.upstream(node).iter().any(|u| dirty.contains(u)) {
                continue;
            }
            update.recomputed.push(node);
            if self.recompute(node, state)? {
                dirty.insert(node);
                update.changed.push(node);
            }
        }

        tracing::debug!(
            node = %input,
            recomputed = update.recomputed.len(),
            changed = update.changed.len(),
            "Applied input change"
        );
        Ok(update)
    }

    /// Validate and store an input value. Returns whether it changed.
    fn set_input(&self, state: &mut ExploreState, change: InputChange) -> ControllerResult<bool> {
        match change {
            InputChange::Dataset { value } => {
                self.check_dataset(&value)?;
                Ok(replace(&mut state.dataset, value))
            }
            InputChange::X { value } => {
                self.check_field(state, Node::X, &value)?;
                Ok(replace(&mut state.axes.x, value))
            }
            InputChange::Y { value } => {
                self.check_field(state, Node::Y, &value)?;
                Ok(replace(&mut state.axes.y, value))
            }
            InputChange::Color { value } => {
                if let Some(field) = &value {
                    self.check_field(state, Node::Color, field)?;
                }
                Ok(replace(&mut state.axes.color, value))
            }
            InputChange::NuclideColor { value } => {
                if let Some(field) = &value {
                    self.check_field(state, Node::NuclideColor, field)?;
                }
                Ok(replace(&mut state.nuclide_color, value))
            }
            InputChange::SelectPoints { dataset, points } => {
                let selection = if self.is_stale(state, dataset.as_deref()) {
                    PointSelection::new()
                } else {
                    let rows = self.registry.get(&state.dataset)?.row_count();
                    points.into_iter().filter(|&id| id < rows).collect()
                };
                Ok(replace(&mut state.selection, selection))
            }
            InputChange::SelectRegion { dataset, x, y } => {
                let selection = if self.is_stale(state, dataset.as_deref()) {
                    PointSelection::new()
                } else {
                    let ds = self.registry.get(&state.dataset)?;
                    rows_in_region(ds, &state.axes, &Region::new(x, y))
                };
                Ok(replace(&mut state.selection, selection))
            }
            InputChange::ClearSelection => Ok(replace(&mut state.selection, PointSelection::new())),
        }
    }

    /// Recompute a derived node from the current state. Returns whether
    /// its value changed.
    fn recompute(&self, node: Node, state: &mut ExploreState) -> ControllerResult<bool> {
        let entry = self.registry.entry(&state.dataset)?;
        let dataset = &entry.dataset;
        let defaults = &entry.defaults;

        let changed = match node {
            Node::XOptions => replace(&mut state.x_options, field_options(dataset.fields())),
            Node::YOptions => replace(&mut state.y_options, field_options(dataset.fields())),
            Node::ColorOptions => replace(&mut state.color_options, field_options(dataset.fields())),
            Node::NuclideColorOptions => replace(
                &mut state.nuclide_color_options,
                field_options(dataset.fields()),
            ),
            Node::X => replace(&mut state.axes.x, defaults.x.clone()),
            Node::Y => replace(&mut state.axes.y, defaults.y.clone()),
            Node::Color => replace(&mut state.axes.color, defaults.color.clone()),
            Node::NuclideColor => replace(&mut state.nuclide_color, defaults.nuclide_color.clone()),
            Node::Selection => replace(&mut state.selection, PointSelection::new()),
            Node::ScatterChart => {
                let chart = scatter_chart(dataset, &entry.label_field, &state.axes);
                replace(&mut state.scatter_chart, chart)
            }
            Node::NuclideChart => {
                let chart = nuclide_chart(
                    dataset,
                    &entry.label_field,
                    state.nuclide_color.as_deref(),
                    &state.selection,
                );
                replace(&mut state.nuclide_chart, chart)
            }
            Node::Dataset => false,
        };
        Ok(changed)
    }

    fn check_dataset(&self, name: &str) -> ControllerResult<()> {
        if self.registry.contains(name) {
            Ok(())
        } else {
            Err(ControllerError::UnknownDataset(name.to_string()))
        }
    }

    fn check_field(&self, state: &ExploreState, node: Node, field: &str) -> ControllerResult<()> {
        if self.registry.get(&state.dataset)?.has_field(field) {
            Ok(())
        } else {
            Err(ControllerError::UnknownField {
                dataset: state.dataset.clone(),
                field: field.to_string(),
                node,
            })
        }
    }

    /// A selection drawn on a different dataset than the active one
    fn is_stale(&self, state: &ExploreState, origin: Option<&str>) -> bool {
        let stale = origin.is_some_and(|name| name != state.dataset);
        if stale {
            tracing::debug!(active = %state.dataset, origin = ?origin, "Discarding stale selection");
        }
        stale
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
