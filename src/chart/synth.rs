//! Chart synthesis
//!
//! Pure functions from (dataset, field choices, point selection) to a
//! `ChartSpec`. No I/O and no hidden state: equal inputs always give equal
//! charts. Inputs that cannot be plotted (unknown fields, text nucleon
//! columns) produce an empty chart instead of an error.

use serde::{Deserialize, Serialize};

use crate::dataset::{AxisSelection, Dataset, PointSelection, NEUTRON_FIELD, PROTON_FIELD};

use super::labels::{axis_title, spectral_reversed};
use super::magic::magic_overlays;
use super::spec::{AxisTitles, ChartKind, ChartPoint, ChartSpec, DragMode, Layout};

/// Rectangular region drawn on the scatter chart, in data coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Region {
    pub fn new(x: [f64; 2], y: [f64; 2]) -> Self {
        Self { x, y }
    }

    /// Inclusive containment; corner order does not matter
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let within = |v: f64, [a, b]: [f64; 2]| v >= a.min(b) && v <= a.max(b);
        within(x, self.x) && within(y, self.y)
    }
}

/// Rows to emphasise: every row when nothing is selected, otherwise the
/// selected ids that are valid rows
pub fn highlight<I>(selection: &PointSelection, rows: I) -> PointSelection
where
    I: IntoIterator<Item = usize>,
{
    if selection.is_empty() {
        rows.into_iter().collect()
    } else {
        rows.into_iter().filter(|id| selection.contains(id)).collect()
    }
}

/// Chart of nuclides: N on x, Z on y, optional colour field, highlight
/// mask from the scatter selection and magic-number bands
pub fn nuclide_chart(
    dataset: &Dataset,
    label_field: &str,
    color: Option<&str>,
    selection: &PointSelection,
) -> ChartSpec {
    let nucleons_numeric = [NEUTRON_FIELD, PROTON_FIELD]
        .iter()
        .all(|f| dataset.column(f).is_some_and(|c| c.is_numeric()));
    if !nucleons_numeric {
        tracing::warn!(dataset = %dataset.name(), "Nucleon columns unusable, rendering empty chart");
        return ChartSpec::empty(ChartKind::Nuclide);
    }

    let Some(points) = plot_points(dataset, NEUTRON_FIELD, PROTON_FIELD, color, label_field) else {
        return ChartSpec::empty(ChartKind::Nuclide);
    };

    ChartSpec {
        kind: ChartKind::Nuclide,
        titles: AxisTitles {
            x: axis_title(NEUTRON_FIELD),
            y: axis_title(PROTON_FIELD),
            color: color.map(str::to_string),
        },
        points,
        highlight: Some(highlight(selection, dataset.row_ids())),
        shapes: magic_overlays(dataset),
        color_scale: spectral_reversed(),
        layout: Layout {
            marker_symbol: Some("square".to_string()),
            ..Layout::default()
        },
    }
}

/// Free-axis scatter chart. Every point carries its row id so a drawn
/// region maps back to a point selection.
pub fn scatter_chart(dataset: &Dataset, label_field: &str, axes: &AxisSelection) -> ChartSpec {
    let Some(points) = plot_points(
        dataset,
        &axes.x,
        &axes.y,
        axes.color.as_deref(),
        label_field,
    ) else {
        return ChartSpec::empty(ChartKind::Scatter);
    };

    ChartSpec {
        kind: ChartKind::Scatter,
        titles: AxisTitles {
            x: axes.x.clone(),
            y: axes.y.clone(),
            color: axes.color.clone(),
        },
        points,
        highlight: None,
        shapes: Vec::new(),
        color_scale: spectral_reversed(),
        layout: Layout {
            drag_mode: DragMode::Select,
            ..Layout::default()
        },
    }
}

/// Row ids whose numeric (x, y) on the scatter chart fall inside `region`
pub fn rows_in_region(dataset: &Dataset, axes: &AxisSelection, region: &Region) -> PointSelection {
    let (Some(x), Some(y)) = (dataset.column(&axes.x), dataset.column(&axes.y)) else {
        return PointSelection::new();
    };

    dataset
        .row_ids()
        .filter(|&row| match (x.number(row), y.number(row)) {
            (Some(vx), Some(vy)) => region.contains(vx, vy),
            _ => false,
        })
        .collect()
}

/// Points for every row with both coordinates present. `None` when any
/// named field is missing from the dataset.
fn plot_points(
    dataset: &Dataset,
    x: &str,
    y: &str,
    color: Option<&str>,
    label_field: &str,
) -> Option<Vec<ChartPoint>> {
    let lookup = |field: &str| {
        let column = dataset.column(field);
        if column.is_none() {
            tracing::warn!(dataset = %dataset.name(), field, "Unknown field, rendering empty chart");
        }
        column
    };

    let x_col = lookup(x)?;
    let y_col = lookup(y)?;
    let color_col = match color {
        Some(field) => Some(lookup(field)?),
        None => None,
    };
    let label_col = dataset.column(label_field);

    let points = dataset
        .row_ids()
        .filter_map(|row| {
            Some(ChartPoint {
                id: row,
                x: x_col.coord(row)?,
                y: y_col.coord(row)?,
                color: color_col.and_then(|c| c.coord(row)),
                label: label_col.and_then(|c| c.text(row)),
            })
        })
        .collect();

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Coord;

    fn ame_mass() -> Dataset {
        let mut records = Vec::new();
        for z in 1..=10u32 {
            for n in z.saturating_sub(1)..=z + 2 {
                records.push(vec![
                    n.to_string(),
                    z.to_string(),
                    format!("E{}", z),
                    format!("{}", (n * 100 + z) as f64 * 0.5),
                    if n == z { "No_Data".to_string() } else { format!("{}", n as f64 - z as f64) },
                ]);
            }
        }
        Dataset::from_records(
            "AME 16 Mass",
            vec![
                "N".into(),
                "Z".into(),
                "EL".into(),
                "Mass Excess".into(),
                "Beta-Decay Energy".into(),
            ],
            records,
        )
    }

    fn selection(ids: impl IntoIterator<Item = usize>) -> PointSelection {
        ids.into_iter().collect()
    }

    #[test]
    fn test_highlight_empty_selection_is_everything() {
        assert_eq!(highlight(&PointSelection::new(), 0..5), selection(0..5));
    }

    #[test]
    fn test_highlight_intersects_with_valid_rows() {
        assert_eq!(highlight(&selection([1, 3, 99]), 0..5), selection([1, 3]));
        // Non-empty selection with no valid ids highlights nothing
        assert!(highlight(&selection([99]), 0..5).is_empty());
    }

    #[test]
    fn test_nuclide_chart_uses_nucleon_axes() {
        let ds = ame_mass();
        let chart = nuclide_chart(&ds, "EL", Some("Mass Excess"), &PointSelection::new());

        assert_eq!(chart.kind, ChartKind::Nuclide);
        assert_eq!(chart.points.len(), ds.row_count());
        assert_eq!(chart.points[0].x, Coord::Number(0.0));
        assert_eq!(chart.points[0].y, Coord::Number(1.0));
        assert_eq!(chart.points[0].label.as_deref(), Some("E1"));
        assert_eq!(chart.titles.y, "Proton Number (Z)");
        assert_eq!(chart.highlight, Some(selection(ds.row_ids())));
        assert_eq!(chart.layout.marker_symbol.as_deref(), Some("square"));
        // Z=2 and Z=8 bands plus N=2 and N=8 bands
        assert_eq!(chart.shapes.len(), 4);
    }

    #[test]
    fn test_nuclide_chart_highlights_selection() {
        let ds = ame_mass();
        let chart = nuclide_chart(&ds, "EL", None, &selection(10..=20));
        assert_eq!(chart.highlight, Some(selection(10..=20)));
        assert!(chart.points.iter().all(|p| p.color.is_none()));
    }

    #[test]
    fn test_nuclide_chart_unknown_color_fails_closed() {
        let ds = ame_mass();
        let chart = nuclide_chart(&ds, "EL", Some("Emic"), &PointSelection::new());
        assert_eq!(chart, ChartSpec::empty(ChartKind::Nuclide));
    }

    #[test]
    fn test_scatter_chart_skips_rows_without_coordinates() {
        let ds = ame_mass();
        let axes = AxisSelection::new("Beta-Decay Energy", "Mass Excess", None);
        let chart = scatter_chart(&ds, "EL", &axes);

        // One row per Z has N == Z and therefore no beta-decay energy
        assert_eq!(chart.points.len(), ds.row_count() - 10);
        assert!(chart.points.iter().all(|p| p.x.as_number().is_some()));
        assert_eq!(chart.layout.drag_mode, DragMode::Select);
        assert!(chart.highlight.is_none());
        assert!(chart.shapes.is_empty());
    }

    #[test]
    fn test_scatter_chart_points_carry_row_ids() {
        let ds = ame_mass();
        let axes = AxisSelection::new("N", "Z", Some("Mass Excess".to_string()));
        let chart = scatter_chart(&ds, "EL", &axes);
        let ids: Vec<usize> = chart.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, ds.row_ids().collect::<Vec<_>>());
        assert!(chart.points.iter().all(|p| p.color.is_some()));
    }

    #[test]
    fn test_scatter_chart_unknown_field_fails_closed() {
        let ds = ame_mass();
        let axes = AxisSelection::new("Emic", "Z", None);
        assert!(scatter_chart(&ds, "EL", &axes).is_empty());
    }

    #[test]
    fn test_scatter_chart_categorical_axis() {
        let ds = ame_mass();
        let axes = AxisSelection::new("EL", "Z", None);
        let chart = scatter_chart(&ds, "EL", &axes);
        assert_eq!(chart.points[0].x, Coord::Category("E1".to_string()));
    }

    #[test]
    fn test_synthesis_is_pure() {
        let ds = ame_mass();
        let before = ds.clone();
        let axes = AxisSelection::new("N", "Mass Excess", Some("Z".to_string()));

        assert_eq!(scatter_chart(&ds, "EL", &axes), scatter_chart(&ds, "EL", &axes));
        assert_eq!(
            nuclide_chart(&ds, "EL", Some("Z"), &selection([3])),
            nuclide_chart(&ds, "EL", Some("Z"), &selection([3]))
        );
        assert_eq!(ds, before);
    }

    #[test]
    fn test_rows_in_region() {
        let ds = ame_mass();
        let axes = AxisSelection::new("N", "Z", None);
        // Corners given in reverse order
        let picked = rows_in_region(&ds, &axes, &Region::new([3.0, 2.0], [2.0, 2.0]));
        let expected: PointSelection = ds
            .row_ids()
            .filter(|&r| {
                let n = ds.column("N").unwrap().number(r).unwrap();
                let z = ds.column("Z").unwrap().number(r).unwrap();
                z == 2.0 && (2.0..=3.0).contains(&n)
            })
            .collect();
        assert_eq!(picked, expected);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_empty_region_selects_nothing() {
        let ds = ame_mass();
        let axes = AxisSelection::new("N", "Z", None);
        let picked = rows_in_region(&ds, &axes, &Region::new([500.0, 600.0], [0.0, 1.0]));
        assert!(picked.is_empty());
    }
}
