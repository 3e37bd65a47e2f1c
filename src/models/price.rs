use serde::{Deserialize, Serialize};

use super::vehicle::Vehicle;
use crate::config::CURRENT_VALUE_LABEL;

// ---------------------------------------------------------------------------
// PricePoint — One row of a price history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub label: String,
    #[serde(rename = "valor", alias = "amount")]
    pub amount: f64,
}

impl PricePoint {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// True for the sentinel "current value" row.
    pub fn is_current_value(&self) -> bool {
        self.label == CURRENT_VALUE_LABEL
    }
}

// ---------------------------------------------------------------------------
// PriceHistory — Localized price history of one slot, current value first
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub vehicle: Vehicle,
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    pub fn current(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn current_amount(&self) -> Option<f64> {
        self.current().map(|p| p.amount)
    }
}
