//! Display names for dataset fields and the chart colour scale

use serde::Serialize;

/// One entry of a field dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    /// Human-friendly name
    pub label: String,
    /// Raw column name
    pub value: String,
}

/// Shorten raw column names for display
pub fn display_name(field: &str) -> String {
    field.replace("Beta", "β").replace("Experimental", "Exp.")
}

/// Dropdown options for every field, in column order
pub fn field_options(fields: &[String]) -> Vec<FieldOption> {
    fields
        .iter()
        .map(|f| FieldOption {
            label: display_name(f),
            value: f.clone(),
        })
        .collect()
}

/// Diverging "Spectral" scale, reversed so high values are red
pub fn spectral_reversed() -> Vec<String> {
    [
        "rgb(94,79,162)",
        "rgb(50,136,189)",
        "rgb(102,194,165)",
        "rgb(171,221,164)",
        "rgb(230,245,152)",
        "rgb(255,255,191)",
        "rgb(254,224,139)",
        "rgb(253,174,97)",
        "rgb(244,109,67)",
        "rgb(213,62,79)",
        "rgb(158,1,66)",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// Axis title for a field; the nucleon counts get descriptive names
pub fn axis_title(field: &str) -> String {
    match field {
        "N" => "Neutron Number (N)".to_string(),
        "Z" => "Proton Number (Z)".to_string(),
        other => display_name(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("Beta-Decay Energy"), "β-Decay Energy");
        assert_eq!(display_name("Experimental Mass"), "Exp. Mass");
        assert_eq!(display_name("Mass Excess"), "Mass Excess");
    }

    #[test]
    fn test_field_options_keep_raw_values() {
        let options = field_options(&["N".to_string(), "Beta-Decay Energy".to_string()]);
        assert_eq!(options[1].label, "β-Decay Energy");
        assert_eq!(options[1].value, "Beta-Decay Energy");
    }

    #[test]
    fn test_axis_title() {
        assert_eq!(axis_title("Z"), "Proton Number (Z)");
        assert_eq!(axis_title("Emic"), "Emic");
    }
}
