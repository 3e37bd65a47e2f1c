//! Shared test fixtures for the FIPE SDK integration tests.
//!
//! Provides `FakeCatalog`, an in-memory `CatalogGateway` with scripted
//! responses that records every call it receives, and `sample_catalog()`
//! preloaded with a small Fiat/VW dataset.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use fipe_sdk::{CatalogGateway, CatalogKey, FipeError, PricePoint, Result, Suggestion, Vehicle};

/// A call received by the fake, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Options(CatalogKey),
    PriceHistory(Vehicle),
    Suggestions(Vec<f64>),
}

#[derive(Default)]
pub struct FakeCatalog {
    options: HashMap<CatalogKey, std::result::Result<Vec<String>, String>>,
    prices: HashMap<Vehicle, std::result::Result<Vec<PricePoint>, String>>,
    suggestions: Option<std::result::Result<Vec<Suggestion>, String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, key: CatalogKey, options: &[&str]) -> Self {
        self.options
            .insert(key, Ok(options.iter().map(|s| s.to_string()).collect()));
        self
    }

    pub fn with_failing_options(mut self, key: CatalogKey) -> Self {
        self.options.insert(key, Err("connection refused".into()));
        self
    }

    pub fn with_prices(mut self, vehicle: Vehicle, points: Vec<PricePoint>) -> Self {
        self.prices.insert(vehicle, Ok(points));
        self
    }

    pub fn with_failing_prices(mut self, vehicle: Vehicle) -> Self {
        self.prices.insert(vehicle, Err("timeout".into()));
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = Some(Ok(suggestions));
        self
    }

    pub fn with_failing_suggestions(mut self) -> Self {
        self.suggestions = Some(Err("bad gateway".into()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn price_calls(&self) -> Vec<Vehicle> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::PriceHistory(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn suggestion_calls(&self) -> Vec<Vec<f64>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Suggestions(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub fn option_calls(&self) -> Vec<CatalogKey> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Options(k) => Some(k),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CatalogGateway for FakeCatalog {
    async fn options(&self, key: &CatalogKey) -> Result<Vec<String>> {
        self.record(Call::Options(key.clone()));
        match self.options.get(key) {
            Some(Ok(options)) => Ok(options.clone()),
            Some(Err(msg)) => Err(FipeError::InvalidArgument(msg.clone())),
            None => Ok(Vec::new()),
        }
    }

    async fn price_history(&self, vehicle: &Vehicle) -> Result<Vec<PricePoint>> {
        self.record(Call::PriceHistory(vehicle.clone()));
        match self.prices.get(vehicle) {
            Some(Ok(points)) => Ok(points.clone()),
            Some(Err(msg)) => Err(FipeError::InvalidArgument(msg.clone())),
            None => Err(FipeError::NotFound(format!("no prices for {}", vehicle))),
        }
    }

    async fn suggestions(&self, current_values: &[f64]) -> Result<Vec<Suggestion>> {
        self.record(Call::Suggestions(current_values.to_vec()));
        match &self.suggestions {
            Some(Ok(s)) => Ok(s.clone()),
            Some(Err(msg)) => Err(FipeError::InvalidArgument(msg.clone())),
            None => Ok(Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn uno() -> Vehicle {
    Vehicle::new("Fiat", "Uno", "2020", "Flex")
}

pub fn gol() -> Vehicle {
    Vehicle::new("VW", "Gol", "2019", "Gasolina")
}

pub fn suggestion(brand: &str, model: &str, price: f64) -> Suggestion {
    Suggestion {
        brand: brand.to_string(),
        model: model.to_string(),
        year: "2021".to_string(),
        fuel_type: "Flex".to_string(),
        price,
    }
}

/// A catalog with Fiat and VW data for every option lookup, plus price
/// histories for `uno()` and `gol()`.
pub fn sample_catalog() -> FakeCatalog {
    let fiat = || "Fiat".to_string();
    let vw = || "VW".to_string();
    FakeCatalog::new()
        .with_options(CatalogKey::Brands, &["Fiat", "VW", "Chevrolet"])
        .with_options(CatalogKey::ModelsForBrand { brand: fiat() }, &["Uno", "Palio", "Argo"])
        .with_options(CatalogKey::YearsForBrand { brand: fiat() }, &["2021", "2020", "2019", "2015"])
        .with_options(
            CatalogKey::YearsForModel { brand: fiat(), model: "Uno".into() },
            &["2020", "2019"],
        )
        .with_options(
            CatalogKey::ModelsForYear { brand: fiat(), year: "2020".into() },
            &["Uno", "Argo"],
        )
        .with_options(
            CatalogKey::FuelTypes { brand: fiat(), model: "Uno".into(), year: "2020".into() },
            &["Flex", "Gasolina"],
        )
        .with_options(CatalogKey::ModelsForBrand { brand: vw() }, &["Gol", "Polo"])
        .with_options(CatalogKey::YearsForBrand { brand: vw() }, &["2019", "2018"])
        .with_options(
            CatalogKey::YearsForModel { brand: vw(), model: "Gol".into() },
            &["2019"],
        )
        .with_options(
            CatalogKey::FuelTypes { brand: vw(), model: "Gol".into(), year: "2019".into() },
            &["Gasolina"],
        )
        .with_prices(
            uno(),
            vec![
                PricePoint::new("Valor Atual", 30000.0),
                PricePoint::new("January/2020", 28000.0),
            ],
        )
        .with_prices(
            gol(),
            vec![
                PricePoint::new("Valor Atual", 42000.0),
                PricePoint::new("December/2019", 41500.0),
                PricePoint::new("November/2019", 41000.0),
            ],
        )
}
