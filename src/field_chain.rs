//! Dependent-field state machine for one vehicle slot.
//!
//! A [`FieldChain`] owns the brand/model/year/fuel-type values of a slot and
//! the option lists that depend on them. Transitions are synchronous: each
//! setter updates values, resets downstream state and returns the [`Lookup`]s
//! the caller must run against a [`CatalogGateway`](crate::catalog::CatalogGateway).
//! Results come back through [`FieldChain::resolve`].
//!
//! Every option list carries a generation counter that is bumped on each reset
//! or reload. A lookup remembers the generation it was issued for, and a result
//! whose generation no longer matches is dropped as stale. Out-of-order
//! responses therefore can never overwrite a newer selection.

use crate::catalog::CatalogKey;
use crate::error::{FipeError, Result};
use crate::models::{Field, Vehicle};

// ---------------------------------------------------------------------------
// FieldState / OptionList
// ---------------------------------------------------------------------------

/// Load state of one option list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldState {
    #[default]
    Empty,
    Loading,
    Ready(Vec<String>),
    /// The lookup failed; the message is kept for diagnostics.
    Error(String),
}

impl FieldState {
    /// Options to present. `Empty`, `Loading` and `Error` all present as no options.
    pub fn options(&self) -> &[String] {
        match self {
            FieldState::Ready(options) => options,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FieldState::Loading)
    }
}

/// An option list tagged with the generation of its current content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    state: FieldState,
    generation: u64,
}

impl OptionList {
    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard content and invalidate any lookup in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = FieldState::Empty;
    }

    /// Enter `Loading` and return the generation the new lookup must carry.
    pub fn begin_loading(&mut self) -> u64 {
        self.generation += 1;
        self.state = FieldState::Loading;
        self.generation
    }

    /// Apply a lookup result if `generation` is still current.
    pub fn accept(&mut self, generation: u64, result: Result<Vec<String>>) -> Resolution {
        if generation != self.generation {
            return Resolution::Stale;
        }
        match result {
            Ok(options) => {
                self.state = FieldState::Ready(options);
                Resolution::Applied
            }
            Err(e) => {
                self.state = FieldState::Error(e.to_string());
                Resolution::Failed
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup / Resolution
// ---------------------------------------------------------------------------

/// An option-list lookup issued by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Field whose option list the result populates.
    pub field: Field,
    pub generation: u64,
    pub key: CatalogKey,
}

/// What happened to a delivered lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The lookup failed and the target list is now in `Error`.
    Failed,
    /// The target list moved on since the lookup was issued; nothing changed.
    Stale,
}

// ---------------------------------------------------------------------------
// FieldChain
// ---------------------------------------------------------------------------

/// The four dependent selections of one slot and their option lists.
///
/// Brand options are global and live outside the chain; the chain owns the
/// model, year and fuel-type lists.
#[derive(Debug, Clone, Default)]
pub struct FieldChain {
    vehicle: Vehicle,
    models: OptionList,
    years: OptionList,
    fuel_types: OptionList,
}

impl FieldChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn value(&self, field: Field) -> &str {
        self.vehicle.get(field)
    }

    pub fn is_complete(&self) -> bool {
        self.vehicle.is_complete()
    }

    /// Whether `field` accepts input given the current upstream values.
    pub fn is_enabled(&self, field: Field) -> bool {
        let v = &self.vehicle;
        match field {
            Field::Brand => true,
            Field::Model | Field::Year => !v.brand.is_empty(),
            Field::FuelType => !v.brand.is_empty() && !v.model.is_empty() && !v.year.is_empty(),
        }
    }

    /// Option list for `field`. Brand options are not slot-local, so `Brand` yields `None`.
    pub fn option_list(&self, field: Field) -> Option<&OptionList> {
        match field {
            Field::Brand => None,
            Field::Model => Some(&self.models),
            Field::Year => Some(&self.years),
            Field::FuelType => Some(&self.fuel_types),
        }
    }

    pub fn state(&self, field: Field) -> Option<&FieldState> {
        self.option_list(field).map(OptionList::state)
    }

    pub fn options(&self, field: Field) -> &[String] {
        self.state(field).map(FieldState::options).unwrap_or(&[])
    }

    fn option_list_mut(&mut self, field: Field) -> Option<&mut OptionList> {
        match field {
            Field::Brand => None,
            Field::Model => Some(&mut self.models),
            Field::Year => Some(&mut self.years),
            Field::FuelType => Some(&mut self.fuel_types),
        }
    }

    /// Dispatch to the setter for `field`.
    pub fn set(&mut self, field: Field, value: &str) -> Result<Vec<Lookup>> {
        match field {
            Field::Brand => Ok(self.set_brand(value)),
            Field::Model => self.set_model(value),
            Field::Year => self.set_year(value),
            Field::FuelType => self.set_fuel_type(value).map(|_| Vec::new()),
        }
    }

    /// Select a brand. Model, year and fuel type are cleared; model and year
    /// options are reloaded for the new brand.
    pub fn set_brand(&mut self, brand: &str) -> Vec<Lookup> {
        self.vehicle = Vehicle {
            brand: brand.to_string(),
            ..Vehicle::default()
        };
        self.fuel_types.reset();

        if brand.is_empty() {
            self.models.reset();
            self.years.reset();
            return Vec::new();
        }

        let brand = brand.to_string();
        vec![
            self.load(Field::Year, CatalogKey::YearsForBrand { brand: brand.clone() }),
            self.load(Field::Model, CatalogKey::ModelsForBrand { brand }),
        ]
    }

    /// Select a model. The year value and fuel type are cleared and the year
    /// options are re-derived for the brand and model.
    pub fn set_model(&mut self, model: &str) -> Result<Vec<Lookup>> {
        self.require_enabled(Field::Model)?;

        self.vehicle.model = model.to_string();
        self.vehicle.year.clear();
        self.vehicle.fuel_type.clear();
        self.fuel_types.reset();

        let brand = self.vehicle.brand.clone();
        let key = if model.is_empty() {
            CatalogKey::YearsForBrand { brand }
        } else {
            CatalogKey::YearsForModel {
                brand,
                model: model.to_string(),
            }
        };
        Ok(vec![self.load(Field::Year, key)])
    }

    /// Select a year. Fuel type is cleared; without a model the model options
    /// are narrowed to the year, otherwise fuel-type options are loaded.
    pub fn set_year(&mut self, year: &str) -> Result<Vec<Lookup>> {
        self.require_enabled(Field::Year)?;

        self.vehicle.year = year.to_string();
        self.vehicle.fuel_type.clear();
        self.fuel_types.reset();

        let brand = self.vehicle.brand.clone();
        if self.vehicle.model.is_empty() {
            let key = if year.is_empty() {
                CatalogKey::ModelsForBrand { brand }
            } else {
                CatalogKey::ModelsForYear {
                    brand,
                    year: year.to_string(),
                }
            };
            return Ok(vec![self.load(Field::Model, key)]);
        }

        if year.is_empty() {
            return Ok(Vec::new());
        }
        let key = CatalogKey::FuelTypes {
            brand,
            model: self.vehicle.model.clone(),
            year: year.to_string(),
        };
        Ok(vec![self.load(Field::FuelType, key)])
    }

    pub fn set_fuel_type(&mut self, fuel_type: &str) -> Result<()> {
        self.require_enabled(Field::FuelType)?;
        self.vehicle.fuel_type = fuel_type.to_string();
        Ok(())
    }

    /// Deliver the result of a lookup previously returned by a setter.
    pub fn resolve(&mut self, lookup: &Lookup, result: Result<Vec<String>>) -> Resolution {
        let Some(list) = self.option_list_mut(lookup.field) else {
            return Resolution::Stale;
        };
        if let Err(e) = &result {
            if list.generation() == lookup.generation {
                tracing::warn!(key = %lookup.key, error = %e, "option lookup failed");
            }
        }
        let resolution = list.accept(lookup.generation, result);
        match resolution {
            Resolution::Stale => {
                tracing::trace!(key = %lookup.key, generation = lookup.generation, "discarding stale lookup");
            }
            Resolution::Applied => {
                tracing::debug!(key = %lookup.key, count = list.state().options().len(), "options loaded");
            }
            Resolution::Failed => {}
        }
        resolution
    }

    fn load(&mut self, field: Field, key: CatalogKey) -> Lookup {
        let generation = match self.option_list_mut(field) {
            Some(list) => list.begin_loading(),
            None => 0,
        };
        tracing::debug!(%key, %field, generation, "issuing option lookup");
        Lookup {
            field,
            generation,
            key,
        }
    }

    fn require_enabled(&self, field: Field) -> Result<()> {
        if self.is_enabled(field) {
            Ok(())
        } else {
            Err(FipeError::FieldDisabled(field))
        }
    }
}
