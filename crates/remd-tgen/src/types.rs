//! Core data types for generator parameters and results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar form value: a number, a small integer code, or a value phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric view of the value, parsing text when it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Raw-code parameters as posted to the generator form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by raw field code.
    pub fn get(&self, code: &str) -> Option<&ParamValue> {
        self.values.get(code)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, code: impl Into<String>, value: ParamValue) {
        self.values.insert(code.into(), value);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in field-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Form-encodable `(code, value)` pairs in field-code order.
    pub fn to_form(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

/// One row of the temperatures/energies table.
///
/// Energies are in kJ/mol; `p12` is the exchange probability with the next
/// replica. Cells the server leaves empty come through as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    pub temperature: f64,
    pub mu: f64,
    pub sigma: f64,
    pub mu12: f64,
    pub sigma12: f64,
    pub p12: f64,
}

/// Number of numeric columns in a full energy row.
pub const ENERGY_COLUMNS: usize = 6;

impl TryFrom<&[f64]> for EnergyRecord {
    type Error = RemdError;

    fn try_from(row: &[f64]) -> Result<Self, Self::Error> {
        match *row {
            [temperature, mu, sigma, mu12, sigma12, p12] => Ok(Self {
                temperature,
                mu,
                sigma,
                mu12,
                sigma12,
                p12,
            }),
            _ => Err(RemdError::RowWidth {
                expected: ENERGY_COLUMNS,
                found: row.len(),
            }),
        }
    }
}

/// Errors that can occur talking to the temperature generator.
#[derive(thiserror::Error, Debug)]
pub enum RemdError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Marker not found in response: {0:?}")]
    MarkerNotFound(String),

    #[error("No temperature list follows the marker")]
    TemperatureListNotFound,

    #[error("Table #{0} not found in response")]
    TableNotFound(usize),

    #[error("Invalid number {value:?} in {context}")]
    InvalidNumber { value: String, context: String },

    #[error("Expected {expected} columns, found {found}")]
    RowWidth { expected: usize, found: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience result type.
pub type RemdResult<T> = Result<T, RemdError>;
