//! Parameter input from the command line and from JSON files.

use std::path::Path;

use anyhow::{bail, Context, Result};
use remd_tgen::ParamValue;

/// Parse a `KEY=VALUE` assignment.
///
/// The value becomes an integer or a float when it parses as one, and a
/// value phrase otherwise. Keys may contain spaces ("number of protein atoms=50").
pub fn parse_assignment(raw: &str) -> Result<(String, ParamValue)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Expected KEY=VALUE, got {raw:?}");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Empty parameter name in {raw:?}");
    }
    Ok((key.to_string(), parse_value(value.trim())))
}

fn parse_value(s: &str) -> ParamValue {
    if let Ok(v) = s.parse::<i64>() {
        return ParamValue::Int(v);
    }
    if let Ok(v) = s.parse::<f64>() {
        return ParamValue::Float(v);
    }
    ParamValue::Text(s.to_string())
}

/// Read parameters from a JSON object of `name: value` pairs.
pub fn read_params_file(path: &Path) -> Result<Vec<(String, ParamValue)>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&data)
        .with_context(|| format!("{} is not a JSON object", path.display()))?;

    map.into_iter()
        .map(|(key, value)| {
            let value: ParamValue = serde_json::from_value(value.clone())
                .with_context(|| format!("Unsupported value for {key:?}: {value}"))?;
            Ok((key, value))
        })
        .collect()
}

/// Merge file parameters with command-line assignments, the latter winning.
pub fn collect_params(
    file: Option<&Path>,
    assignments: &[String],
) -> Result<Vec<(String, ParamValue)>> {
    let mut params = match file {
        Some(path) => read_params_file(path)?,
        None => Vec::new(),
    };

    for raw in assignments {
        let (key, value) = parse_assignment(raw)?;
        match params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => params.push((key, value)),
        }
    }

    Ok(params)
}
