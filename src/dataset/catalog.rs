//! Dataset catalog
//!
//! Describes where each dataset comes from and how it is presented:
//! the file to read, its format, the column used to label nuclides on
//! hover, and the default field choices for both charts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::types::AxisSelection;

/// On-disk format of a dataset source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceFormat {
    /// One comma-separated file, one dataset
    #[default]
    Csv,
    /// An `.xlsx` workbook; every sheet becomes a dataset named
    /// `"<source name>: <sheet name>"` with `strip_suffix` removed
    Workbook {
        #[serde(default)]
        strip_suffix: Option<String>,
    },
}

/// Default field choices for a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDefaults {
    /// Scatter chart x / y / colour
    pub x: String,
    pub y: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Colour field of the chart of nuclides
    #[serde(default)]
    pub nuclide_color: Option<String>,
}

impl DatasetDefaults {
    pub fn new(x: &str, y: &str, color: &str, nuclide_color: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            color: Some(color.to_string()),
            nuclide_color: Some(nuclide_color.to_string()),
        }
    }

    pub fn axes(&self) -> AxisSelection {
        AxisSelection::new(self.x.clone(), self.y.clone(), self.color.clone())
    }
}

/// A named tabular source read once at start-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    /// Relative paths are resolved against the data directory
    pub path: PathBuf,
    #[serde(default)]
    pub format: SourceFormat,
    /// Column identifying the nuclide on hover (element symbol)
    pub label_field: String,
    pub defaults: DatasetDefaults,
}

impl DatasetSource {
    pub fn csv(name: &str, path: impl Into<PathBuf>, label_field: &str, defaults: DatasetDefaults) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            format: SourceFormat::Csv,
            label_field: label_field.to_string(),
            defaults,
        }
    }

    /// Resolve `path` against `data_dir` unless it is already absolute
    pub fn resolved(mut self, data_dir: &Path) -> Self {
        if self.path.is_relative() {
            self.path = data_dir.join(&self.path);
        }
        self
    }

    /// Dataset name for one sheet of a workbook source
    pub fn sheet_dataset_name(&self, sheet: &str) -> String {
        let sheet = match &self.format {
            SourceFormat::Workbook {
                strip_suffix: Some(suffix),
            } => sheet.replace(suffix.as_str(), ""),
            _ => sheet.to_string(),
        };
        format!("{}: {}", self.name, sheet)
    }
}

/// The datasets shipped with the explorer, in dropdown order
pub fn builtin_sources() -> Vec<DatasetSource> {
    vec![
        DatasetSource::csv(
            "AME 16 Mass",
            Path::new("AME2016").join("mass16.csv"),
            "EL",
            DatasetDefaults::new("Beta-Decay Energy", "Mass Excess", "Atomic Mass", "Mass Excess"),
        ),
        DatasetSource::csv(
            "AME 16 React",
            Path::new("AME2016").join("react16.csv"),
            "elt",
            DatasetDefaults::new("S(2n)", "S(2p)", "Q(a)", "S(p)"),
        ),
        DatasetSource::csv(
            "FRDM 2012",
            "frdm2012named.csv",
            "EL",
            DatasetDefaults::new("Emic", "Es+p", "Ebind", "eps4"),
        ),
        DatasetSource {
            name: "Mass Explorer".to_string(),
            path: Path::new("Mass_Explorer").join("All_Nuclei.xlsx"),
            format: SourceFormat::Workbook {
                strip_suffix: Some("_all_nuclei".to_string()),
            },
            label_field: "Symbol".to_string(),
            defaults: DatasetDefaults::new("S_p_(MeV)", "S_n_(MeV)", "Q_{alpha}_(MeV)", "S_p_(MeV)"),
        },
    ]
}
