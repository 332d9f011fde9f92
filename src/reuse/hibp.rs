//! Have I Been Pwned client.
//!
//! Uses the Pwned Passwords range API: only the 5-character prefix of the
//! SHA-1 digest is sent. The breach catalog is public and keyless.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::breach::{BreachError, BreachLookup};
use crate::fingerprint::RangePrefix;

pub const DEFAULT_RANGE_URL: &str = "https://api.pwnedpasswords.com/range";
pub const DEFAULT_CATALOG_URL: &str = "https://haveibeenpwned.com/api/v3/breaches";

const USER_AGENT: &str = concat!("pwd-crackcheck/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Data class marking a breach that exposed passwords.
const PASSWORDS_DATA_CLASS: &str = "Passwords";

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "DataClasses", default)]
    data_classes: Vec<String>,
}

/// [`BreachLookup`] backed by the HIBP HTTP APIs.
#[derive(Debug, Clone)]
pub struct HibpClient {
    client: reqwest::Client,
    range_url: String,
    catalog_url: String,
}

impl HibpClient {
    /// # Errors
    ///
    /// Returns [`BreachError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, BreachError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BreachError::Client(e.to_string()))?;

        Ok(Self {
            client,
            range_url: DEFAULT_RANGE_URL.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
        })
    }

    /// Base URL the prefix is appended to, e.g. a self-hosted mirror.
    #[must_use]
    pub fn with_range_url(mut self, url: impl Into<String>) -> Self {
        self.range_url = url.into();
        self
    }

    #[must_use]
    pub fn with_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, BreachError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BreachError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BreachError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl BreachLookup for HibpClient {
    async fn range(&self, prefix: &RangePrefix) -> Result<String, BreachError> {
        let url = format!("{}/{}", self.range_url.trim_end_matches('/'), prefix);
        self.get(&url)
            .await?
            .text()
            .await
            .map_err(|e| BreachError::Decode(e.to_string()))
    }

    async fn password_breach_sources(&self) -> Result<Vec<String>, BreachError> {
        let catalog: Vec<CatalogEntry> = self
            .get(&self.catalog_url)
            .await?
            .json()
            .await
            .map_err(|e| BreachError::Decode(e.to_string()))?;

        Ok(catalog
            .into_iter()
            .filter(|entry| entry.data_classes.iter().any(|c| c == PASSWORDS_DATA_CLASS))
            .map(|entry| entry.name)
            .collect())
    }
}
