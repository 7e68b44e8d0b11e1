//! Client for the REMD temperature generator web server.
//!
//! Given the size of a solvated protein system, a temperature range and a
//! desired exchange probability, the server predicts a temperature ladder for
//! replica-exchange molecular dynamics together with the energy statistics of
//! each replica. See <http://folding.bmc.uu.se/remd/>.

pub mod client;
pub mod config;
pub mod params;
pub mod parser;
pub mod types;

pub use client::TemperatureClient;
pub use config::{resolve_endpoint_url, ClientConfig, DEFAULT_URL};
pub use params::{
    default_parameters, fields, load_parameters, normalize_phrase, FieldSpec, ValueMap,
};
pub use parser::{parse_energy_records, parse_temperature_table, parse_temperatures};
pub use types::*;
