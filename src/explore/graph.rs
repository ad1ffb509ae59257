//! Explore dependency graph
//!
//! Every UI value of the explore view is a node. Input nodes are set by the
//! user; derived nodes are recomputed from their declared upstream nodes.
//! The graph is validated once (all upstreams declared, no cycles) and
//! traversed in a fixed topological order.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// A value in the explore view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Active dataset
    Dataset,
    /// Scatter chart x field
    X,
    /// Scatter chart y field
    Y,
    /// Scatter chart colour field (optional)
    Color,
    /// Chart of nuclides colour field (optional)
    NuclideColor,
    /// Row ids selected on the scatter chart
    Selection,
    XOptions,
    YOptions,
    ColorOptions,
    NuclideColorOptions,
    NuclideChart,
    ScatterChart,
}

impl Node {
    pub fn name(self) -> &'static str {
        match self {
            Node::Dataset => "dataset",
            Node::X => "x",
            Node::Y => "y",
            Node::Color => "color",
            Node::NuclideColor => "nuclide_color",
            Node::Selection => "selection",
            Node::XOptions => "x_options",
            Node::YOptions => "y_options",
            Node::ColorOptions => "color_options",
            Node::NuclideColorOptions => "nuclide_color_options",
            Node::NuclideChart => "nuclide_chart",
            Node::ScatterChart => "scatter_chart",
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node and the nodes it is recomputed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub node: Node,
    pub upstream: Vec<Node>,
}

impl NodeSpec {
    pub fn new(node: Node, upstream: &[Node]) -> Self {
        Self {
            node,
            upstream: upstream.to_vec(),
        }
    }
}

/// Graph construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} declared twice")]
    Duplicate(Node),

    #[error("Node {node} depends on undeclared node {upstream}")]
    UnknownUpstream { node: Node, upstream: Node },

    #[error("Dependency cycle through: {0:?}")]
    Cycle(Vec<Node>),
}

/// The explore view wiring
///
/// Value nodes depend on both the dataset and their option list so that a
/// dataset switch always resets them to the dataset's defaults, and the
/// option list is refreshed first.
pub fn explore_nodes() -> Vec<NodeSpec> {
    use Node::*;
    vec![
        NodeSpec::new(Dataset, &[]),
        NodeSpec::new(XOptions, &[Dataset]),
        NodeSpec::new(YOptions, &[Dataset]),
        NodeSpec::new(ColorOptions, &[Dataset]),
        NodeSpec::new(NuclideColorOptions, &[Dataset]),
        NodeSpec::new(X, &[Dataset, XOptions]),
        NodeSpec::new(Y, &[Dataset, YOptions]),
        NodeSpec::new(Color, &[Dataset, ColorOptions]),
        NodeSpec::new(NuclideColor, &[Dataset, NuclideColorOptions]),
        NodeSpec::new(Selection, &[Dataset]),
        NodeSpec::new(ScatterChart, &[Dataset, X, Y, Color]),
        NodeSpec::new(NuclideChart, &[Dataset, NuclideColor, Selection]),
    ]
}

/// Validated dependency graph with a precomputed traversal order
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    specs: Vec<NodeSpec>,
    order: Vec<Node>,
}

impl DependencyGraph {
    /// Validate `specs` and compute a topological order. Ties are broken by
    /// declaration order so the traversal is deterministic.
    pub fn new(specs: Vec<NodeSpec>) -> Result<Self, GraphError> {
        let mut declared = HashSet::new();
        for spec in &specs {
            if !declared.insert(spec.node) {
                return Err(GraphError::Duplicate(spec.node));
            }
        }
        for spec in &specs {
            if let Some(&missing) = spec.upstream.iter().find(|u| !declared.contains(*u)) {
                return Err(GraphError::UnknownUpstream {
                    node: spec.node,
                    upstream: missing,
                });
            }
        }

        // Kahn's algorithm, picking the earliest declared ready node
        let mut placed: HashSet<Node> = HashSet::new();
        let mut order = Vec::with_capacity(specs.len());
        while order.len() < specs.len() {
            let next = specs.iter().find(|s| {
                !placed.contains(&s.node) && s.upstream.iter().all(|u| placed.contains(u))
            });
            match next {
                Some(spec) => {
                    placed.insert(spec.node);
                    order.push(spec.node);
                }
                None => {
                    let stuck = specs
                        .iter()
                        .map(|s| s.node)
                        .filter(|n| !placed.contains(n))
                        .collect();
                    return Err(GraphError::Cycle(stuck));
                }
            }
        }

        Ok(Self { specs, order })
    }

    /// The explore view graph
    pub fn explore() -> Result<Self, GraphError> {
        Self::new(explore_nodes())
    }

    /// Nodes in recomputation order
    pub fn order(&self) -> &[Node] {
        &self.order
    }

    pub fn upstream(&self, node: Node) -> &[Node] {
        self.specs
            .iter()
            .find(|s| s.node == node)
            .map(|s| s.upstream.as_slice())
            .unwrap_or(&[])
    }

    /// Every node transitively reachable from `node`, in traversal order
    pub fn affected_by(&self, node: Node) -> Vec<Node> {
        let mut reached = HashSet::from([node]);
        let mut affected = Vec::new();
        for &n in &self.order {
            if n != node && self.upstream(n).iter().any(|u| reached.contains(u)) {
                reached.insert(n);
                affected.push(n);
            }
        }
        affected
    }
}
