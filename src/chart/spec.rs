//! Chart specification types
//!
//! Render-agnostic descriptions of the two explore charts. They serialize
//! to JSON that the browser turns into Plotly traces; nothing here knows
//! how a chart is drawn.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::dataset::Coord;

/// Which chart a specification describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Chart of nuclides (N vs Z)
    Nuclide,
    /// Free-axis scatter plot
    Scatter,
}

/// A single plotted row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Row identifier within the dataset
    pub id: usize,
    pub x: Coord,
    pub y: Coord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Coord>,
    /// Hover label (element symbol)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Axis and colour bar titles
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Outline style of an overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

/// Annotated rectangle drawn over the chart of nuclides
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "rect")]
pub struct Overlay {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub opacity: f64,
    pub line: LineStyle,
    pub fillcolor: String,
}

impl Overlay {
    /// Magic-number band style: translucent white with a gray outline
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            opacity: 0.2,
            line: LineStyle {
                color: "gray".to_string(),
                width: 2.0,
            },
            fillcolor: "white".to_string(),
        }
    }
}

/// Drag behaviour of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    Zoom,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
    pub r: u32,
}

/// Layout hints passed through to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub height: u32,
    pub margin: Margin,
    pub drag_mode: DragMode,
    /// Vertical modebar keeps it clear of the dropdowns
    pub modebar_orientation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_symbol: Option<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            height: 600,
            margin: Margin { t: 20, b: 0, r: 160 },
            drag_mode: DragMode::Zoom,
            modebar_orientation: "v".to_string(),
            marker_symbol: None,
        }
    }
}

/// Complete, render-agnostic chart description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub titles: AxisTitles,
    pub points: Vec<ChartPoint>,
    /// Row ids drawn emphasised; `None` when the chart has no highlight mask
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<BTreeSet<usize>>,
    pub shapes: Vec<Overlay>,
    pub color_scale: Vec<String>,
    pub layout: Layout,
}

impl ChartSpec {
    /// A chart with nothing on it, used when inputs cannot be plotted
    pub fn empty(kind: ChartKind) -> Self {
        Self {
            kind,
            titles: AxisTitles::default(),
            points: Vec::new(),
            highlight: match kind {
                ChartKind::Nuclide => Some(BTreeSet::new()),
                ChartKind::Scatter => None,
            },
            shapes: Vec::new(),
            color_scale: Vec::new(),
            layout: Layout::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_serializes_as_rect_shape() {
        let json = serde_json::to_value(Overlay::rect(2.0, 7.5, 16.0, 8.5)).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["x0"], 2.0);
        assert_eq!(json["line"]["color"], "gray");
        assert_eq!(json["opacity"], 0.2);
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartSpec::empty(ChartKind::Scatter);
        assert!(chart.is_empty());
        assert!(chart.highlight.is_none());
        assert_eq!(chart.layout.height, 600);
    }
}
