//! Read-only access to the remote FIPE vehicle catalog.
//!
//! [`CatalogGateway`] is the only capability the selection engine depends on.
//! [`HttpCatalog`] implements it over JSON/HTTP with `reqwest`; tests and
//! embedders can provide their own implementation.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config;
use crate::error::{FipeError, Result};
use crate::models::{OptionLabels, PricePoint, Suggestion, Vehicle};

// ---------------------------------------------------------------------------
// CatalogKey
// ---------------------------------------------------------------------------

/// Key path of an option-list lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    Brands,
    ModelsForBrand { brand: String },
    YearsForBrand { brand: String },
    YearsForModel { brand: String, model: String },
    ModelsForYear { brand: String, year: String },
    FuelTypes { brand: String, model: String, year: String },
}

impl CatalogKey {
    /// Path segments below the catalog base URL, unencoded.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            CatalogKey::Brands => vec!["marcas"],
            CatalogKey::ModelsForBrand { brand } => vec!["modelos", brand],
            CatalogKey::YearsForBrand { brand } => vec!["anos", brand],
            CatalogKey::YearsForModel { brand, model } => vec!["anos-por-modelo", brand, model],
            CatalogKey::ModelsForYear { brand, year } => vec!["modelos", brand, year],
            CatalogKey::FuelTypes { brand, model, year } => {
                vec!["combustiveis", brand, model, year]
            }
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.segments() {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CatalogGateway
// ---------------------------------------------------------------------------

/// Read-only lookups against the vehicle catalog.
///
/// Every call is an idempotent GET; callers never cancel in-flight calls and
/// instead discard results they no longer need.
pub trait CatalogGateway {
    /// Fetch an option list (brands, models, years or fuel types).
    fn options(&self, key: &CatalogKey) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Fetch the price history of a fully specified vehicle, current value first.
    fn price_history(
        &self,
        vehicle: &Vehicle,
    ) -> impl Future<Output = Result<Vec<PricePoint>>> + Send;

    /// Fetch vehicles priced near the given current values.
    fn suggestions(
        &self,
        current_values: &[f64],
    ) -> impl Future<Output = Result<Vec<Suggestion>>> + Send;
}

// ---------------------------------------------------------------------------
// HttpCatalog
// ---------------------------------------------------------------------------

/// [`CatalogGateway`] backed by the FIPE JSON API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: Url,
    client: Client,
}

impl HttpCatalog {
    /// Create a gateway rooted at `base_url` (e.g. `http://localhost:3001/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FipeError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FipeError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { base_url, client })
    }

    /// Create a gateway using [`config::default_base_url`] and the default timeout.
    pub fn from_env() -> Result<Self> {
        Self::new(&config::default_base_url(), config::DEFAULT_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the absolute URL for the given path segments, percent-encoding each one.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FipeError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url_for(segments)?;
        tracing::debug!(%url, "catalog request");

        let resp = self.client.get(url.clone()).query(query).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(FipeError::NotFound(format!("{} returned 404", url.path())));
        }
        let resp = resp.error_for_status()?;
        Ok(resp.json::<T>().await?)
    }
}

impl CatalogGateway for HttpCatalog {
    async fn options(&self, key: &CatalogKey) -> Result<Vec<String>> {
        let labels: OptionLabels = self.get_json(&key.segments(), &[]).await?;
        Ok(labels.0)
    }

    async fn price_history(&self, vehicle: &Vehicle) -> Result<Vec<PricePoint>> {
        let query = [
            ("marca", vehicle.brand.clone()),
            ("modelo", vehicle.model.clone()),
            ("ano", vehicle.year.clone()),
            ("combustivel", vehicle.fuel_type.clone()),
        ];
        self.get_json(&["precos"], &query).await
    }

    async fn suggestions(&self, current_values: &[f64]) -> Result<Vec<Suggestion>> {
        if current_values.is_empty() {
            return Err(FipeError::InvalidArgument(
                "suggestions require at least one current value".into(),
            ));
        }
        let query: Vec<(&str, String)> = current_values
            .iter()
            .map(|v| ("valores[]", v.to_string()))
            .collect();
        self.get_json(&["sugestoes"], &query).await
    }
}
