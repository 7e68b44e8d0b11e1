//! Translation of user parameters into the generator's raw form fields.
//!
//! Parameters may be given either with the raw form codes (`Np`, `PC`, ...)
//! or with the labels shown on the web form ("number of protein atoms",
//! "constraints in the protein", ...). Labels and value phrases are matched
//! case-insensitively with runs of whitespace collapsed.

use crate::types::{ParamValue, ParameterSet, RemdError, RemdResult};

/// Raw code of the one field every request must specify.
pub const ATOM_COUNT_CODE: &str = "Np";

/// Label of the required atom-count field.
pub const ATOM_COUNT_LABEL: &str = "number of protein atoms";

/// How a labelled field translates its value.
#[derive(Debug, Clone, Copy)]
pub enum ValueMap {
    /// Numeric value posted as given.
    PassThrough,
    /// Value phrase translated to an integer code.
    Choices(&'static [(&'static str, i64)]),
}

/// One field of the generator form.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub code: &'static str,
    pub label: &'static str,
    pub default: ParamValue,
    pub values: ValueMap,
}

const WATER_CONSTRAINTS: &[(&str, i64)] =
    &[("fully flexible", 0), ("flexible angle", 2), ("rigid", 3)];

const PROTEIN_CONSTRAINTS: &[(&str, i64)] = &[
    ("fully flexible", 0),
    ("bonds to hydrogens only", 1),
    ("all bonds", 2),
];

const PROTEIN_HYDROGENS: &[(&str, i64)] = &[("all h", 0), ("polar h", 1)];

const SIMULATION_TYPES: &[(&str, i64)] = &[("npt", 0), ("nvt", 1)];

const VIRTUAL_SITES: &[(&str, i64)] = &[("none", 0), ("virtual hydrogen", 1)];

/// Every field of the form, with its label and default.
pub static FIELDS: &[FieldSpec] = &[
    FieldSpec {
        code: "Pdes",
        label: "exchange probability",
        default: ParamValue::Float(0.25),
        values: ValueMap::PassThrough,
    },
    FieldSpec {
        code: "Tol",
        label: "tolerance",
        default: ParamValue::Float(1e-4),
        values: ValueMap::PassThrough,
    },
    FieldSpec {
        code: "Tlow",
        label: "lower temperature limit",
        default: ParamValue::Int(300),
        values: ValueMap::PassThrough,
    },
    FieldSpec {
        code: "Thigh",
        label: "upper temperature limit",
        default: ParamValue::Int(500),
        values: ValueMap::PassThrough,
    },
    FieldSpec {
        code: "Nw",
        label: "number of water molecules",
        default: ParamValue::Int(0),
        values: ValueMap::PassThrough,
    },
    FieldSpec {
        code: "WC",
        label: "constraints in water",
        default: ParamValue::Int(3),
        values: ValueMap::Choices(WATER_CONSTRAINTS),
    },
    FieldSpec {
        code: ATOM_COUNT_CODE,
        label: ATOM_COUNT_LABEL,
        default: ParamValue::Int(200),
        values: ValueMap::PassThrough,
    },
    FieldSpec {
        code: "PC",
        label: "constraints in the protein",
        default: ParamValue::Int(1),
        values: ValueMap::Choices(PROTEIN_CONSTRAINTS),
    },
    FieldSpec {
        code: "Hff",
        label: "hydrogens in protein",
        default: ParamValue::Int(0),
        values: ValueMap::Choices(PROTEIN_HYDROGENS),
    },
    FieldSpec {
        code: "Vs",
        label: "virtual sites in protein",
        default: ParamValue::Int(0),
        values: ValueMap::Choices(VIRTUAL_SITES),
    },
    FieldSpec {
        code: "Alg",
        label: "simulation type",
        default: ParamValue::Int(0),
        values: ValueMap::Choices(SIMULATION_TYPES),
    },
];

/// The field catalogue.
pub fn fields() -> &'static [FieldSpec] {
    FIELDS
}

/// Fresh copy of the default parameters.
pub fn default_parameters() -> ParameterSet {
    let mut set = ParameterSet::new();
    for field in FIELDS {
        set.set(field.code, field.default.clone());
    }
    set
}

/// Lowercase and collapse whitespace runs to a single space.
pub fn normalize_phrase(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up a field by its (unnormalized) label.
pub fn lookup_label(label: &str) -> Option<&'static FieldSpec> {
    let label = normalize_phrase(label);
    FIELDS.iter().find(|f| f.label == label)
}

/// Look up a field by its raw code, ignoring case.
pub fn lookup_code(code: &str) -> Option<&'static FieldSpec> {
    let code = code.trim();
    FIELDS.iter().find(|f| f.code.eq_ignore_ascii_case(code))
}

/// Build the complete raw-code parameter set from user input.
///
/// When the input carries the raw `Np` key every entry is copied over the
/// defaults as given. Otherwise keys are read as form labels, or as raw codes
/// in any case; unknown keys and untranslatable values are logged and skipped.
pub fn load_parameters<I, K, V>(input: I) -> RemdResult<ParameterSet>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<ParamValue>,
{
    let input: Vec<(String, ParamValue)> = input
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.into()))
        .collect();

    let has_atom_count = input.iter().any(|(k, _)| {
        let key = normalize_phrase(k);
        key == ATOM_COUNT_LABEL || key.eq_ignore_ascii_case(ATOM_COUNT_CODE)
    });
    if !has_atom_count {
        return Err(RemdError::MissingParameter(ATOM_COUNT_LABEL.to_string()));
    }

    let mut params = default_parameters();

    if input.iter().any(|(k, _)| k == ATOM_COUNT_CODE) {
        tracing::debug!("Loading {} raw form parameters", input.len());
        for (key, value) in input {
            if lookup_code(&key).is_none() {
                tracing::warn!("Unknown form field {key:?} posted as given");
            }
            params.set(key, value);
        }
        return Ok(params);
    }

    for (key, value) in input {
        let Some(field) = lookup_label(&key).or_else(|| lookup_code(&key)) else {
            tracing::warn!("Invalid variable: {key:?}");
            continue;
        };
        match translate_value(field, &value) {
            Some(v) => params.set(field.code, v),
            None => tracing::warn!("Invalid value {value:?} for {:?}", field.label),
        }
    }

    Ok(params)
}

fn translate_value(field: &FieldSpec, value: &ParamValue) -> Option<ParamValue> {
    match field.values {
        ValueMap::PassThrough => match value {
            ParamValue::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(ParamValue::Int)
                    .or_else(|_| s.parse::<f64>().map(ParamValue::Float))
                    .ok()
            }
            other => Some(other.clone()),
        },
        ValueMap::Choices(choices) => match value {
            ParamValue::Text(s) => {
                let phrase = normalize_phrase(s);
                choices
                    .iter()
                    .find(|(name, _)| *name == phrase)
                    .map(|(_, code)| ParamValue::Int(*code))
            }
            // Numeric input is accepted only if it is already a valid code.
            other => {
                let n = other.as_f64()?;
                choices
                    .iter()
                    .find(|(_, code)| *code as f64 == n)
                    .map(|(_, code)| ParamValue::Int(*code))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_readable_atom_count() {
        let params = load_parameters([("number of protein atoms", 50)]).unwrap();
        assert_eq!(params.get("Np"), Some(&ParamValue::Int(50)));

        let defaults = default_parameters();
        for (code, value) in params.iter().filter(|(c, _)| *c != "Np") {
            assert_eq!(defaults.get(code), Some(value), "field {code}");
        }
        assert_eq!(params.len(), FIELDS.len());
    }

    #[test]
    fn test_raw_codes_pass_through() {
        let params = load_parameters([("Np", 20)]).unwrap();
        assert_eq!(params.get("Np"), Some(&ParamValue::Int(20)));
        assert_eq!(params.get("Tlow"), Some(&ParamValue::Int(300)));
        assert_eq!(params.get("Pdes"), Some(&ParamValue::Float(0.25)));
    }

    #[test]
    fn test_raw_mode_copies_values_verbatim() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("Np", ParamValue::Int(20)),
            ("PC", ParamValue::Int(2)),
            ("Thigh", ParamValue::Float(450.5)),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("PC"), Some(&ParamValue::Int(2)));
        assert_eq!(params.get("Thigh"), Some(&ParamValue::Float(450.5)));
        assert_eq!(params.get("WC"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_atom_count_code_in_any_case_is_kept() {
        for key in ["np", "NP", " Np "] {
            let params = load_parameters([(key, 20)]).unwrap();
            assert_eq!(params.get("Np"), Some(&ParamValue::Int(20)), "key {key:?}");
            assert!(!params.contains(key), "key {key:?}");
            assert_eq!(params.len(), FIELDS.len());
        }
    }

    #[test]
    fn test_codes_in_label_mode_are_translated() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("np", 20.into()),
            ("pc", "all bonds".into()),
            ("constraints in water", "rigid".into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("Np"), Some(&ParamValue::Int(20)));
        assert_eq!(params.get("PC"), Some(&ParamValue::Int(2)));
        assert_eq!(params.get("WC"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_raw_mode_posts_labels_verbatim() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("Np", 20.into()),
            ("constraints in the protein", "all bonds".into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("PC"), Some(&ParamValue::Int(1)));
        assert_eq!(
            params.get("constraints in the protein"),
            Some(&ParamValue::Text("all bonds".to_string()))
        );
    }

    #[test]
    fn test_missing_atom_count_fails() {
        let err = load_parameters([("tolerance", 0.001)]).unwrap_err();
        assert!(matches!(err, RemdError::MissingParameter(_)));

        let empty: [(&str, i64); 0] = [];
        assert!(load_parameters(empty).is_err());
    }

    #[test]
    fn test_atom_count_key_is_case_and_space_insensitive() {
        let params = load_parameters([("  Number of   PROTEIN atoms ", 75)]).unwrap();
        assert_eq!(params.get("Np"), Some(&ParamValue::Int(75)));
    }

    #[test]
    fn test_value_phrase_translation() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("number of protein atoms", 50.into()),
            ("constraints in the  PROTEIN  ", "bonds to hydrogens only".into()),
            ("Constraints in water", "Flexible   Angle".into()),
            ("simulation type", "NVT".into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("PC"), Some(&ParamValue::Int(1)));
        assert_eq!(params.get("WC"), Some(&ParamValue::Int(2)));
        assert_eq!(params.get("Alg"), Some(&ParamValue::Int(1)));
    }

    #[test]
    fn test_unknown_key_is_skipped() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("number of protein atoms", 50.into()),
            ("flux capacitor", 88.into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.len(), FIELDS.len());
        assert!(!params.contains("flux capacitor"));
    }

    #[test]
    fn test_unknown_value_phrase_keeps_default() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("number of protein atoms", 50.into()),
            ("constraints in water", "wobbly".into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("WC"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_numeric_choice_code_accepted() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("number of protein atoms", 50.into()),
            ("virtual sites in protein", 1.into()),
            ("hydrogens in protein", 7.into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("Vs"), Some(&ParamValue::Int(1)));
        assert_eq!(params.get("Hff"), Some(&ParamValue::Int(0)));
    }

    #[test]
    fn test_numeric_text_for_pass_through_field() {
        let input: Vec<(&str, ParamValue)> = vec![
            ("number of protein atoms", "120".into()),
            ("exchange probability", "0.3".into()),
            ("tolerance", "tight".into()),
        ];
        let params = load_parameters(input).unwrap();
        assert_eq!(params.get("Np"), Some(&ParamValue::Int(120)));
        assert_eq!(params.get("Pdes"), Some(&ParamValue::Float(0.3)));
        assert_eq!(params.get("Tol"), Some(&ParamValue::Float(1e-4)));
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(
            normalize_phrase("Constraints in the  PROTEIN  "),
            normalize_phrase("constraints in the protein")
        );
        assert_eq!(normalize_phrase("\tAll\n H "), "all h");
    }

    #[test]
    fn test_lookup_code_ignores_case() {
        assert_eq!(lookup_code("pdes").map(|f| f.code), Some("Pdes"));
        assert!(lookup_code("nope").is_none());
    }

    #[test]
    fn test_defaults_cover_every_field_once() {
        let defaults = default_parameters();
        assert_eq!(defaults.len(), FIELDS.len());
        assert_eq!(defaults.get("Np"), Some(&ParamValue::Int(200)));
        assert_eq!(defaults.get("Tol"), Some(&ParamValue::Float(1e-4)));
    }
}
