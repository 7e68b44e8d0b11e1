//! Command-line front end for the REMD temperature generator client.

pub mod input;
pub mod output;

pub use input::{collect_params, parse_assignment, read_params_file};
