//! Explore view state
//!
//! One `ExploreState` per session holds the current value of every node in
//! the dependency graph: the user's inputs, the dropdown option lists
//! derived from them, and both chart specifications.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartKind, ChartSpec, FieldOption};
use crate::dataset::{AxisSelection, PointSelection};

use super::graph::Node;

/// Current value of every explore node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExploreState {
    pub dataset: String,
    pub axes: AxisSelection,
    pub nuclide_color: Option<String>,
    pub selection: PointSelection,
    pub x_options: Vec<FieldOption>,
    pub y_options: Vec<FieldOption>,
    pub color_options: Vec<FieldOption>,
    pub nuclide_color_options: Vec<FieldOption>,
    pub nuclide_chart: ChartSpec,
    pub scatter_chart: ChartSpec,
}

impl ExploreState {
    /// State for `dataset` with every derived node still blank
    pub(crate) fn blank(dataset: &str) -> Self {
        Self {
            dataset: dataset.to_string(),
            axes: AxisSelection::new("", "", None),
            nuclide_color: None,
            selection: PointSelection::new(),
            x_options: Vec::new(),
            y_options: Vec::new(),
            color_options: Vec::new(),
            nuclide_color_options: Vec::new(),
            nuclide_chart: ChartSpec::empty(ChartKind::Nuclide),
            scatter_chart: ChartSpec::empty(ChartKind::Scatter),
        }
    }

    /// Snapshot of one node's value
    pub fn value(&self, node: Node) -> NodeValue {
        match node {
            Node::Dataset => NodeValue::Field(Some(self.dataset.clone())),
            Node::X => NodeValue::Field(Some(self.axes.x.clone())),
            Node::Y => NodeValue::Field(Some(self.axes.y.clone())),
            Node::Color => NodeValue::Field(self.axes.color.clone()),
            Node::NuclideColor => NodeValue::Field(self.nuclide_color.clone()),
            Node::Selection => NodeValue::Selection(self.selection.clone()),
            Node::XOptions => NodeValue::Options(self.x_options.clone()),
            Node::YOptions => NodeValue::Options(self.y_options.clone()),
            Node::ColorOptions => NodeValue::Options(self.color_options.clone()),
            Node::NuclideColorOptions => NodeValue::Options(self.nuclide_color_options.clone()),
            Node::NuclideChart => NodeValue::Chart(Box::new(self.nuclide_chart.clone())),
            Node::ScatterChart => NodeValue::Chart(Box::new(self.scatter_chart.clone())),
        }
    }
}

/// A node value as sent to the browser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeValue {
    Field(Option<String>),
    Options(Vec<FieldOption>),
    Selection(PointSelection),
    Chart(Box<ChartSpec>),
}

/// A user interaction on the explore view
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputChange {
    /// Pick a dataset
    Dataset { value: String },
    /// Pick the scatter x field
    X { value: String },
    /// Pick the scatter y field
    Y { value: String },
    /// Pick or clear the scatter colour field
    Color {
        #[serde(default)]
        value: Option<String>,
    },
    /// Pick or clear the chart of nuclides colour field
    NuclideColor {
        #[serde(default)]
        value: Option<String>,
    },
    /// Points reported by the scatter chart's selection event. `dataset`
    /// names the dataset the points were drawn from.
    SelectPoints {
        #[serde(default)]
        dataset: Option<String>,
        points: Vec<usize>,
    },
    /// A rectangle drawn on the scatter chart, in data coordinates
    SelectRegion {
        #[serde(default)]
        dataset: Option<String>,
        x: [f64; 2],
        y: [f64; 2],
    },
    /// Drop the current selection
    ClearSelection,
}

impl InputChange {
    /// The input node this interaction sets
    pub fn node(&self) -> Node {
        match self {
            InputChange::Dataset { .. } => Node::Dataset,
            InputChange::X { .. } => Node::X,
            InputChange::Y { .. } => Node::Y,
            InputChange::Color { .. } => Node::Color,
            InputChange::NuclideColor { .. } => Node::NuclideColor,
            InputChange::SelectPoints { .. }
            | InputChange::SelectRegion { .. }
            | InputChange::ClearSelection => Node::Selection,
        }
    }
}
