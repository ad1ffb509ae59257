//! Chart Synthesizer
//!
//! Turns a dataset plus the current selection state into render-agnostic
//! chart specifications for the chart of nuclides and the scatter plot.

pub mod labels;
pub mod magic;
pub mod spec;
pub mod synth;

pub use labels::{axis_title, display_name, field_options, spectral_reversed, FieldOption};
pub use magic::{magic_overlays, MAGIC_NEUTRONS, MAGIC_PROTONS};
pub use spec::{AxisTitles, ChartKind, ChartPoint, ChartSpec, DragMode, Layout, Overlay};
pub use synth::{highlight, nuclide_chart, rows_in_region, scatter_chart, Region};
