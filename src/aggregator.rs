//! Price-history and suggestion aggregation across slots.
//!
//! A submit fetches the price history of every complete slot, localizes the
//! month labels, and then issues a single suggestions lookup keyed by the
//! current values that came back. Per-slot failures are contained: the slot
//! just has no history, and the remaining slots still count.

use futures::future::join_all;

use crate::catalog::CatalogGateway;
use crate::locale::{MonthNames, PT_BR};
use crate::models::{PriceHistory, PricePoint, Suggestion};
use crate::slot_set::{SlotId, SlotSet};

// ---------------------------------------------------------------------------
// SubmitReport
// ---------------------------------------------------------------------------

/// A slot whose price lookup failed during a submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotFailure {
    pub slot: SlotId,
    pub index: usize,
    pub message: String,
}

/// Summary of one submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitReport {
    /// Slots that produced a price history, in slot order.
    pub priced: Vec<SlotId>,
    /// Incomplete slots, excluded without a lookup.
    pub skipped: usize,
    pub failures: Vec<SlotFailure>,
    /// Whether a suggestions lookup was issued.
    pub suggestions_requested: bool,
    /// Message of a failed suggestions lookup.
    pub suggestions_error: Option<String>,
}

// ---------------------------------------------------------------------------
// QueryAggregator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct QueryAggregator {
    months: &'static MonthNames,
    suggestions: Vec<Suggestion>,
}

impl Default for QueryAggregator {
    fn default() -> Self {
        Self::new(&PT_BR)
    }
}

impl QueryAggregator {
    pub fn new(months: &'static MonthNames) -> Self {
        Self {
            months,
            suggestions: Vec::new(),
        }
    }

    pub fn months(&self) -> &'static MonthNames {
        self.months
    }

    /// The pooled suggestions from the last submit.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
    }

    /// Translate month labels, keeping order and amounts.
    pub fn localize(&self, points: Vec<PricePoint>) -> Vec<PricePoint> {
        points
            .into_iter()
            .map(|p| PricePoint {
                label: self.months.translate_label(&p.label),
                amount: p.amount,
            })
            .collect()
    }

    /// Fetch price histories for every complete slot, then the pooled suggestions.
    ///
    /// Each slot's `price_history` is overwritten: with the new history on
    /// success, with `None` when the slot is incomplete, failed or came back empty.
    pub async fn submit<G: CatalogGateway>(
        &mut self,
        gateway: &G,
        slots: &mut SlotSet,
    ) -> SubmitReport {
        let mut report = SubmitReport::default();

        let requests: Vec<_> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.chain().is_complete())
            .map(|(index, slot)| (index, slot.id(), slot.chain().vehicle().clone()))
            .collect();
        report.skipped = slots.len() - requests.len();

        let responses = join_all(
            requests
                .iter()
                .map(|(_, _, vehicle)| gateway.price_history(vehicle)),
        )
        .await;

        for slot in slots.iter_mut() {
            slot.set_price_history(None);
        }

        let mut current_values = Vec::new();
        for ((index, id, vehicle), response) in requests.into_iter().zip(responses) {
            let points = match response {
                Ok(points) => points,
                Err(e) => {
                    tracing::warn!(slot = %id, vehicle = %vehicle, error = %e, "price lookup failed");
                    report.failures.push(SlotFailure {
                        slot: id,
                        index,
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            if points.is_empty() {
                tracing::debug!(slot = %id, vehicle = %vehicle, "empty price history");
                continue;
            }

            let history = PriceHistory {
                vehicle,
                points: self.localize(points),
            };
            current_values.extend(history.current_amount());
            if let Some(slot) = slots.find_mut(id) {
                slot.set_price_history(Some(history));
                report.priced.push(id);
            }
        }

        if current_values.is_empty() {
            self.suggestions.clear();
            return report;
        }

        report.suggestions_requested = true;
        match gateway.suggestions(&current_values).await {
            Ok(suggestions) => {
                tracing::debug!(count = suggestions.len(), "suggestions loaded");
                self.suggestions = suggestions;
            }
            Err(e) => {
                tracing::warn!(error = %e, "suggestions lookup failed");
                self.suggestions.clear();
                report.suggestions_error = Some(e.to_string());
            }
        }
        report
    }
}
