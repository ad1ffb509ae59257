//! Core data types for the nuclide dataset layer
//!
//! This module defines the fundamental types shared by the registry, the
//! chart synthesizer and the explore controller:
//! - `Dataset`: an immutable, column-oriented table of nuclear properties
//! - `Column` and `Cell`: typed column storage and raw cell values
//! - `Coord`: a plottable value (numeric or categorical)
//! - `AxisSelection` and `PointSelection`: user selection state

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

/// Neutron count column present in every dataset
pub const NEUTRON_FIELD: &str = "N";

/// Proton count column present in every dataset
pub const PROTON_FIELD: &str = "Z";

/// Cell contents treated as missing data
pub const MISSING_TOKENS: &[&str] = &["", "*", "No_Data", "NA", "N/A", "NaN", "nan", "null", "-"];

/// Row identifiers selected on the scatter chart. Empty means "no filter".
pub type PointSelection = BTreeSet<usize>;

/// A raw cell value as read from a source file
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classify a textual cell, recognising missing-data tokens and numbers
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_TOKENS.contains(&trimmed) {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_nan() => Cell::Missing,
            Ok(v) => Cell::Number(v),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }
}

/// A plottable value
///
/// Serialized untagged so numeric axes stay numbers and categorical
/// axes stay strings in the chart JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Category(String),
}

impl Coord {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Coord::Number(v) => Some(*v),
            Coord::Category(_) => None,
        }
    }
}

/// Typed column storage
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    /// Build a column from raw cells. The column is numeric unless at least
    /// one present cell is text.
    fn from_cells(cells: Vec<Cell>) -> Self {
        let numeric = cells.iter().all(|c| !matches!(c, Cell::Text(_)));
        if numeric {
            Column::Numeric(
                cells
                    .into_iter()
                    .map(|c| match c {
                        Cell::Number(v) => Some(v),
                        _ => None,
                    })
                    .collect(),
            )
        } else {
            Column::Text(
                cells
                    .into_iter()
                    .map(|c| match c {
                        Cell::Missing => None,
                        Cell::Number(v) => Some(v.to_string()),
                        Cell::Text(s) => Some(s),
                    })
                    .collect(),
            )
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Numeric(_))
    }

    /// Numeric value at `row`, if present
    pub fn number(&self, row: usize) -> Option<f64> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten(),
            Column::Text(_) => None,
        }
    }

    /// Plottable value at `row`, if present
    pub fn coord(&self, row: usize) -> Option<Coord> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten().map(Coord::Number),
            Column::Text(values) => values
                .get(row)
                .cloned()
                .flatten()
                .map(Coord::Category),
        }
    }

    /// Display text at `row`, if present
    pub fn text(&self, row: usize) -> Option<String> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten().map(|v| v.to_string()),
            Column::Text(values) => values.get(row).cloned().flatten(),
        }
    }
}

/// An immutable, named table of nuclear properties
///
/// Rows are identified by their 0-based index. Nothing mutates a dataset
/// after it has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    fields: Vec<String>,
    columns: HashMap<String, Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset from a header row and raw cell records.
    ///
    /// Short records are padded with missing cells, extra cells are
    /// ignored. Repeated header names get a `.1`, `.2`, ... suffix.
    pub fn from_cells(
        name: impl Into<String>,
        headers: Vec<String>,
        records: Vec<Vec<Cell>>,
    ) -> Self {
        let fields = unique_headers(headers);
        let rows = records.len();

        let mut by_column: Vec<Vec<Cell>> = vec![Vec::with_capacity(rows); fields.len()];
        for mut record in records {
            record.resize(fields.len(), Cell::Missing);
            for (idx, cell) in record.into_iter().enumerate() {
                by_column[idx].push(cell);
            }
        }

        let columns = fields
            .iter()
            .cloned()
            .zip(by_column.into_iter().map(Column::from_cells))
            .collect();

        Self {
            name: name.into(),
            fields,
            columns,
            rows,
        }
    }

    /// Build a dataset from textual records (CSV-style)
    pub fn from_records(
        name: impl Into<String>,
        headers: Vec<String>,
        records: Vec<Vec<String>>,
    ) -> Self {
        let cells = records
            .into_iter()
            .map(|r| r.iter().map(|s| Cell::parse(s)).collect())
            .collect();
        Self::from_cells(name, headers, cells)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in source column order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns.contains_key(field)
    }

    pub fn column(&self, field: &str) -> Option<&Column> {
        self.columns.get(field)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// All valid row identifiers
    pub fn row_ids(&self) -> Range<usize> {
        0..self.rows
    }
}

fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|h| {
            let h = h.trim().to_string();
            let count = seen.entry(h.clone()).or_insert(0);
            let name = if *count == 0 {
                h.clone()
            } else {
                format!("{}.{}", h, count)
            };
            *count += 1;
            name
        })
        .collect()
}

/// Fields driving the scatter chart geometry and colouring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl AxisSelection {
    pub fn new(x: impl Into<String>, y: impl Into<String>, color: Option<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(
            "sample",
            vec!["N".into(), "Z".into(), "EL".into(), "Mass Excess".into()],
            vec![
                vec!["1".into(), "1".into(), "H".into(), "8071.3".into()],
                vec!["2".into(), "2".into(), "He".into(), "No_Data".into()],
                vec!["3".into(), "3".into(), "Li".into()],
            ],
        )
    }

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse(" 12.5 "), Cell::Number(12.5));
        assert_eq!(Cell::parse("No_Data"), Cell::Missing);
        assert_eq!(Cell::parse("NaN"), Cell::Missing);
        assert_eq!(Cell::parse("Fe"), Cell::Text("Fe".to_string()));
    }

    #[test]
    fn test_column_types_are_inferred() {
        let ds = sample();
        assert!(ds.column("N").unwrap().is_numeric());
        assert!(!ds.column("EL").unwrap().is_numeric());
        assert_eq!(ds.column("Mass Excess").unwrap().number(0), Some(8071.3));
        assert_eq!(ds.column("Mass Excess").unwrap().number(1), None);
        // Short record padded with a missing cell
        assert_eq!(ds.column("Mass Excess").unwrap().number(2), None);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.row_ids(), 0..3);
    }

    #[test]
    fn test_fields_keep_source_order() {
        let ds = sample();
        assert_eq!(ds.fields(), &["N", "Z", "EL", "Mass Excess"]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let ds = Dataset::from_records(
            "dup",
            vec!["N".into(), "N".into(), "Z".into()],
            vec![vec!["1".into(), "2".into(), "3".into()]],
        );
        assert_eq!(ds.fields(), &["N", "N.1", "Z"]);
        assert_eq!(ds.column("N.1").unwrap().number(0), Some(2.0));
    }

    #[test]
    fn test_coord_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Coord::Number(2.0),
            Coord::Category("He".to_string()),
        ])
        .unwrap();
        assert_eq!(json, r#"[2.0,"He"]"#);
    }
}
