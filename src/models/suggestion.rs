use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Suggestion — A vehicle priced near one of the submitted current values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "marca", alias = "brand")]
    pub brand: String,
    #[serde(rename = "modelo", alias = "model")]
    pub model: String,
    #[serde(rename = "ano", alias = "year", deserialize_with = "super::string_or_number")]
    pub year: String,
    #[serde(rename = "combustivel", alias = "fuelType")]
    pub fuel_type: String,
    #[serde(rename = "preco", alias = "price")]
    pub price: f64,
}
