//! HTTP client for the temperature generator form.
//!
//! One request per call: parameters are resolved, posted form-encoded, and
//! the returned page is parsed. Network errors and non-2xx statuses are
//! returned as-is; nothing is retried.

use std::time::Duration;

use crate::config::ClientConfig;
use crate::params::load_parameters;
use crate::parser::{parse_energy_records, parse_temperature_table, parse_temperatures};
use crate::types::{EnergyRecord, ParamValue, ParameterSet, RemdError, RemdResult};

/// Client for the REMD temperature generator web server.
#[derive(Clone)]
pub struct TemperatureClient {
    client: reqwest::Client,
    url: String,
}

impl TemperatureClient {
    /// Create a client with the given configuration.
    pub fn new(config: &ClientConfig) -> RemdResult<Self> {
        if config.url.trim().is_empty() {
            return Err(RemdError::InvalidConfig("endpoint URL is empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST resolved parameters and return the response page.
    pub async fn submit(&self, params: &ParameterSet) -> RemdResult<String> {
        let form = params.to_form();
        tracing::debug!("POST {} with {} fields", self.url, form.len());

        let body = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        tracing::debug!("Received {} bytes", body.len());
        Ok(body)
    }

    /// Retrieve the temperature ladder (K).
    ///
    /// Sample output: `[300.0, 332.18, 366.98, 404.54, 445.26, 489.27, 536.92]`
    pub async fn get_temperatures<I, K, V>(&self, input: I) -> RemdResult<Vec<f64>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let params = load_parameters(input)?;
        let html = self.submit(&params).await?;
        parse_temperatures(&html)
    }

    /// Retrieve the temperatures/energies table as raw rows.
    ///
    /// Columns, left to right: T (K), μ, σ, μ12, σ12 (kJ/mol), P12.
    pub async fn get_temperatures_energies<I, K, V>(&self, input: I) -> RemdResult<Vec<Vec<f64>>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let params = load_parameters(input)?;
        let html = self.submit(&params).await?;
        parse_temperature_table(&html)
    }

    /// Retrieve the temperatures/energies table as typed records.
    pub async fn get_energy_records<I, K, V>(&self, input: I) -> RemdResult<Vec<EnergyRecord>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let params = load_parameters(input)?;
        let html = self.submit(&params).await?;
        parse_energy_records(&html)
    }
}
