use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Field — One of the four dependent selections of a slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Brand,
    Model,
    Year,
    FuelType,
}

impl Field {
    /// All fields in dependency order.
    pub const ALL: [Field; 4] = [Field::Brand, Field::Model, Field::Year, Field::FuelType];

    pub fn index(self) -> usize {
        match self {
            Field::Brand => 0,
            Field::Model => 1,
            Field::Year => 2,
            Field::FuelType => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Brand => "brand",
            Field::Model => "model",
            Field::Year => "year",
            Field::FuelType => "fuel type",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Vehicle — The four selected values of one slot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "marca", alias = "brand")]
    pub brand: String,
    #[serde(rename = "modelo", alias = "model")]
    pub model: String,
    #[serde(rename = "ano", alias = "year", deserialize_with = "super::string_or_number")]
    pub year: String,
    #[serde(rename = "combustivel", alias = "fuelType")]
    pub fuel_type: String,
}

impl Vehicle {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        year: impl Into<String>,
        fuel_type: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            year: year.into(),
            fuel_type: fuel_type.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Brand => &self.brand,
            Field::Model => &self.model,
            Field::Year => &self.year,
            Field::FuelType => &self.fuel_type,
        }
    }

    /// True when all four fields are non-empty.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| !self.get(*f).is_empty())
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.brand, self.model, self.year, self.fuel_type
        )
    }
}
