//! FIPE vehicle price SDK for Rust.
//!
//! Lets a user configure up to three vehicle query slots, each a chain of
//! dependent selections (brand → model → year → fuel type) backed by the FIPE
//! catalog API, then fetches a localized price history per slot and a pooled
//! list of similarly priced suggestions.
//!
//! # Quick start
//!
//! ```no_run
//! use fipe_sdk::{FipeSdk, Field};
//!
//! # async fn example() -> fipe_sdk::Result<()> {
//! let mut sdk = FipeSdk::builder()
//!     .base_url("http://localhost:3001/api")
//!     .build()?;
//!
//! sdk.load_brands().await;
//! sdk.select(0, Field::Brand, "Fiat").await?;
//! sdk.select(0, Field::Model, "Uno").await?;
//! sdk.select(0, Field::Year, "2020").await?;
//! sdk.select(0, Field::FuelType, "Flex").await?;
//!
//! let report = sdk.submit().await;
//! for (index, history) in sdk.results() {
//!     println!("vehicle {}: {:?}", index + 1, history.current());
//! }
//! println!("{} suggestions", sdk.suggestions().len());
//! # let _ = report;
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod field_chain;
pub mod locale;
pub mod models;
pub mod option_filter;
pub mod slot_set;

pub use aggregator::{QueryAggregator, SlotFailure, SubmitReport};
#[cfg(feature = "blocking")]
pub use blocking::BlockingFipeSdk;
pub use catalog::{CatalogGateway, CatalogKey, HttpCatalog};
pub use error::{FipeError, Result};
pub use field_chain::{FieldChain, FieldState, Lookup, OptionList, Resolution};
pub use locale::MonthNames;
pub use models::{Field, PriceHistory, PricePoint, Suggestion, Vehicle};
pub use option_filter::OptionFilter;
pub use slot_set::{Slot, SlotId, SlotSet};

use std::fmt;
use std::time::Duration;

use futures::future::join_all;

// ---------------------------------------------------------------------------
// FipeSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FipeSdk`] instance.
///
/// Use [`FipeSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](FipeSdkBuilder::build) to create the SDK.
pub struct FipeSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    months: &'static MonthNames,
}

impl Default for FipeSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            months: &locale::PT_BR,
        }
    }
}

impl FipeSdkBuilder {
    /// Set the catalog API base URL.
    ///
    /// If not set, `FIPE_API_URL` is consulted, falling back to
    /// `http://localhost:3001/api`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the month-name table used to localize price labels. Defaults to pt-BR.
    pub fn months(mut self, months: &'static MonthNames) -> Self {
        self.months = months;
        self
    }

    /// Build the SDK over the HTTP catalog.
    ///
    /// No request is made here; call [`FipeSdk::load_brands`] to populate the
    /// brand list.
    pub fn build(self) -> Result<FipeSdk<HttpCatalog>> {
        let base_url = self.base_url.clone().unwrap_or_else(config::default_base_url);
        let gateway = HttpCatalog::new(&base_url, self.timeout)?;
        Ok(self.build_with_gateway(gateway))
    }

    /// Build the SDK over any [`CatalogGateway`]. Base URL and timeout are ignored.
    pub fn build_with_gateway<G: CatalogGateway>(self, gateway: G) -> FipeSdk<G> {
        FipeSdk {
            gateway,
            brands: OptionList::default(),
            slots: SlotSet::new(),
            aggregator: QueryAggregator::new(self.months),
        }
    }
}

// ---------------------------------------------------------------------------
// PendingLookup
// ---------------------------------------------------------------------------

/// Where a pending lookup's result belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTarget {
    Brands,
    Slot(SlotId),
}

/// A lookup handed out by [`FipeSdk::begin_select`], to be run against the
/// gateway and delivered back through [`FipeSdk::complete`] in any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub target: LookupTarget,
    pub lookup: Lookup,
}

impl PendingLookup {
    pub fn key(&self) -> &CatalogKey {
        &self.lookup.key
    }
}

// ---------------------------------------------------------------------------
// FipeSdk
// ---------------------------------------------------------------------------

/// The main entry point: vehicle slots, the shared brand list and the
/// aggregated results of the last submit.
///
/// Created via [`FipeSdk::builder()`].
pub struct FipeSdk<G = HttpCatalog> {
    gateway: G,
    brands: OptionList,
    slots: SlotSet,
    aggregator: QueryAggregator,
}

impl FipeSdk<HttpCatalog> {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> FipeSdkBuilder {
        FipeSdkBuilder::default()
    }
}

impl<G: CatalogGateway> FipeSdk<G> {
    /// Create an SDK over `gateway` with default settings.
    pub fn with_gateway(gateway: G) -> Self {
        FipeSdkBuilder::default().build_with_gateway(gateway)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    // -- Brands -------------------------------------------------------------

    /// Fetch the brand list shared by every slot.
    pub async fn load_brands(&mut self) -> Resolution {
        let pending = self.begin_load_brands();
        let result = self.gateway.options(&pending.lookup.key).await;
        self.complete(pending, result)
    }

    /// Put the brand list into `Loading` and hand out its lookup.
    pub fn begin_load_brands(&mut self) -> PendingLookup {
        let generation = self.brands.begin_loading();
        PendingLookup {
            target: LookupTarget::Brands,
            lookup: Lookup {
                field: Field::Brand,
                generation,
                key: CatalogKey::Brands,
            },
        }
    }

    pub fn brands(&self) -> &FieldState {
        self.brands.state()
    }

    // -- Slots --------------------------------------------------------------

    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Append an empty slot; `false` when three slots already exist.
    pub fn add_slot(&mut self) -> bool {
        let added = self.slots.add();
        if added {
            self.sync_filters();
        }
        added
    }

    /// Remove the slot at `index` with its results. The pooled suggestions
    /// were derived from it and are cleared as well.
    pub fn remove_slot(&mut self, index: usize) -> bool {
        if self.slots.remove(index).is_none() {
            return false;
        }
        self.aggregator.clear();
        self.sync_filters();
        true
    }

    // -- Selection ----------------------------------------------------------

    /// Set `field` of the slot at `index` and run the resulting lookups.
    ///
    /// Lookup failures are contained in the affected option list; only a
    /// missing slot or a disabled field is reported as an error.
    pub async fn select(&mut self, index: usize, field: Field, value: &str) -> Result<()> {
        let pending = self.begin_select(index, field, value)?;
        let gateway = &self.gateway;
        let results = join_all(pending.iter().map(|p| gateway.options(&p.lookup.key))).await;
        for (p, result) in pending.into_iter().zip(results) {
            self.complete(p, result);
        }
        Ok(())
    }

    /// Apply the transition for `field` and return its lookups without running them.
    pub fn begin_select(
        &mut self,
        index: usize,
        field: Field,
        value: &str,
    ) -> Result<Vec<PendingLookup>> {
        let brands = self.brands.state().options();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| FipeError::InvalidArgument(format!("No slot at index {}", index)))?;
        let lookups = slot.select(field, value, brands)?;

        let target = LookupTarget::Slot(slot.id());
        Ok(lookups
            .into_iter()
            .map(|lookup| PendingLookup { target, lookup })
            .collect())
    }

    /// Deliver the result of a pending lookup. Results for removed slots or
    /// superseded generations are discarded.
    pub fn complete(&mut self, pending: PendingLookup, result: Result<Vec<String>>) -> Resolution {
        match pending.target {
            LookupTarget::Brands => {
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "brand lookup failed");
                }
                let resolution = self.brands.accept(pending.lookup.generation, result);
                if resolution != Resolution::Stale {
                    self.sync_filters();
                }
                resolution
            }
            LookupTarget::Slot(id) => {
                let Some(slot) = self.slots.find_mut(id) else {
                    tracing::trace!(slot = %id, key = %pending.lookup.key, "discarding lookup for removed slot");
                    return Resolution::Stale;
                };
                slot.resolve(&pending.lookup, result, self.brands.state().options())
            }
        }
    }

    // -- Input filters ------------------------------------------------------

    pub fn focus(&mut self, index: usize, field: Field) -> Result<()> {
        self.slot_mut(index)?.filter_mut(field).on_focus();
        Ok(())
    }

    /// Feed typed text into a field's filter and return the matching options.
    pub fn type_text(&mut self, index: usize, field: Field, text: &str) -> Result<&[String]> {
        let filter = self.slot_mut(index)?.filter_mut(field);
        filter.on_text_input(text);
        Ok(filter.visible_options())
    }

    pub fn dismiss(&mut self, index: usize, field: Field) -> Result<()> {
        self.slot_mut(index)?.filter_mut(field).on_dismiss();
        Ok(())
    }

    /// Commit an option picked from a field's dropdown and select it.
    pub async fn commit(&mut self, index: usize, field: Field, option: &str) -> Result<()> {
        let committed = self
            .slot_mut(index)?
            .filter_mut(field)
            .on_commit(option.to_string());
        match committed {
            Some(value) => self.select(index, field, &value).await,
            None => Err(FipeError::FieldDisabled(field)),
        }
    }

    // -- Submit / results ---------------------------------------------------

    /// Fetch price histories for every complete slot and the pooled suggestions.
    pub async fn submit(&mut self) -> SubmitReport {
        self.aggregator.submit(&self.gateway, &mut self.slots).await
    }

    /// Price histories from the last submit, with the slot index they belong to.
    pub fn results(&self) -> Vec<(usize, &PriceHistory)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.price_history().map(|h| (i, h)))
            .collect()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        self.aggregator.suggestions()
    }

    /// Discard every slot, option list and result, leaving a single empty slot.
    /// The brand list must be reloaded afterwards.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.brands.reset();
        self.aggregator.clear();
        self.sync_filters();
    }

    /// [`clear`](Self::clear) followed by [`load_brands`](Self::load_brands).
    pub async fn restart(&mut self) -> Resolution {
        self.clear();
        self.load_brands().await
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot> {
        self.slots
            .get_mut(index)
            .ok_or_else(|| FipeError::InvalidArgument(format!("No slot at index {}", index)))
    }

    fn sync_filters(&mut self) {
        let brands = self.brands.state().options();
        for slot in self.slots.iter_mut() {
            slot.sync_filters(brands);
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<G> fmt::Display for FipeSdk<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let complete = self.slots.iter().filter(|s| s.chain().is_complete()).count();
        let priced = self
            .slots
            .iter()
            .filter(|s| s.price_history().is_some())
            .count();
        write!(
            f,
            "FipeSdk(slots={}, complete={}, priced={}, suggestions={}, locale={})",
            self.slots.len(),
            complete,
            priced,
            self.aggregator.suggestions().len(),
            self.aggregator.months().locale
        )
    }
}
