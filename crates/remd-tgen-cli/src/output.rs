//! Plain-text rendering of generator results.

use remd_tgen::{FieldSpec, ParameterSet, ValueMap};

/// Column header of the temperatures/energies table.
pub const TABLE_HEADER: &str =
    "Temperature(K)\tμ(kJ/mol)\tσ(kJ/mol)\tμ12(kJ/mol)\tσ12(kJ/mol)\tP12";

/// Comma-separated temperature ladder.
pub fn format_temperatures(temps: &[f64]) -> String {
    temps
        .iter()
        .map(|t| format!("{t}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tab-separated table with six decimals per value.
pub fn format_table(rows: &[Vec<f64>]) -> String {
    let mut out = String::from(TABLE_HEADER);
    for row in rows {
        out.push('\n');
        let cells: Vec<String> = row.iter().map(|v| format_cell(*v)).collect();
        out.push_str(&cells.join("\t"));
    }
    out
}

fn format_cell(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else {
        format!("{v:.6}")
    }
}

/// One `code=value` line per resolved form field.
pub fn format_params(params: &ParameterSet) -> String {
    params
        .iter()
        .map(|(code, value)| format!("{code}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Field catalogue: code, label, default and accepted value phrases.
pub fn format_fields(fields: &[FieldSpec]) -> String {
    let mut lines = Vec::with_capacity(fields.len());
    for field in fields {
        let mut line = format!(
            "{:<6} {:<28} default {}",
            field.code, field.label, field.default
        );
        if let ValueMap::Choices(choices) = field.values {
            let names: Vec<String> = choices
                .iter()
                .map(|(name, code)| format!("{code} ({name})"))
                .collect();
            line.push_str(&format!("  values: {}", names.join(", ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperatures() {
        assert_eq!(
            format_temperatures(&[300.0, 332.18, 366.98]),
            "300, 332.18, 366.98"
        );
        assert_eq!(format_temperatures(&[]), "");
    }

    #[test]
    fn test_format_table() {
        let rows = vec![vec![300.0, -1201.31, 18.43, f64::NAN, 0.5, 0.25]];
        let text = format_table(&rows);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(TABLE_HEADER));
        assert_eq!(
            lines.next(),
            Some("300.000000\t-1201.310000\t18.430000\tnan\t0.500000\t0.250000")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_format_params_uses_form_encoding() {
        let params = remd_tgen::load_parameters([("Np", 20)]).unwrap();
        let text = format_params(&params);
        assert!(text.lines().any(|l| l == "Np=20"));
        assert!(text.lines().any(|l| l == "Tol=0.0001"));
    }

    #[test]
    fn test_format_fields_lists_choices() {
        let text = format_fields(remd_tgen::fields());
        let pc = text.lines().find(|l| l.starts_with("PC ")).unwrap();
        assert!(pc.contains("constraints in the protein"));
        assert!(pc.contains("1 (bonds to hydrogens only)"));
        assert_eq!(text.lines().count(), remd_tgen::fields().len());
    }
}
