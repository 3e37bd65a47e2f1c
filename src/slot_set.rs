//! Bounded, ordered collection of vehicle query slots.

use std::fmt;

use crate::config::MAX_SLOTS;
use crate::error::Result;
use crate::field_chain::{FieldChain, Lookup, Resolution};
use crate::models::{Field, PriceHistory};
use crate::option_filter::OptionFilter;

// ---------------------------------------------------------------------------
// SlotId
// ---------------------------------------------------------------------------

/// Stable identity of a slot. Positions shift on removal; ids never do and
/// are never reused within one [`SlotSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One vehicle query: its field chain, the input filters for its four fields
/// and the price history from the last submit.
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    chain: FieldChain,
    filters: [OptionFilter; 4],
    price_history: Option<PriceHistory>,
}

impl Slot {
    fn new(id: SlotId) -> Self {
        let mut slot = Self {
            id,
            chain: FieldChain::new(),
            filters: Default::default(),
            price_history: None,
        };
        slot.sync_filters(&[]);
        slot
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn chain(&self) -> &FieldChain {
        &self.chain
    }

    /// History from the last submit, if this slot was priced.
    pub fn price_history(&self) -> Option<&PriceHistory> {
        self.price_history.as_ref()
    }

    pub(crate) fn set_price_history(&mut self, history: Option<PriceHistory>) {
        self.price_history = history;
    }

    /// Set `field` through the chain and return the lookups to run.
    ///
    /// The filters of `field` and of every field below it lose any typed
    /// text, since their values were just rewritten.
    pub fn select(&mut self, field: Field, value: &str, brands: &[String]) -> Result<Vec<Lookup>> {
        let lookups = self.chain.set(field, value)?;
        for f in &Field::ALL[field.index()..] {
            self.filters[f.index()].reset(self.chain.value(*f));
        }
        self.sync_filters(brands);
        Ok(lookups)
    }

    /// Deliver a lookup result to the chain and refresh the filters.
    pub fn resolve(
        &mut self,
        lookup: &Lookup,
        result: Result<Vec<String>>,
        brands: &[String],
    ) -> Resolution {
        let resolution = self.chain.resolve(lookup, result);
        if resolution != Resolution::Stale {
            self.sync_filters(brands);
        }
        resolution
    }

    pub fn filter(&self, field: Field) -> &OptionFilter {
        &self.filters[field.index()]
    }

    pub fn filter_mut(&mut self, field: Field) -> &mut OptionFilter {
        &mut self.filters[field.index()]
    }

    /// Push the chain's values, options and enablement into the input filters.
    pub fn sync_filters(&mut self, brands: &[String]) {
        for field in Field::ALL {
            let options = match field {
                Field::Brand => brands.to_vec(),
                _ => self.chain.options(field).to_vec(),
            };
            let enabled = self.chain.is_enabled(field);
            let filter = &mut self.filters[field.index()];
            filter.configure(self.chain.value(field), options);
            filter.set_disabled(!enabled);
        }
    }
}

// ---------------------------------------------------------------------------
// SlotSet
// ---------------------------------------------------------------------------

/// Ordered slots; the length always stays within `1..=MAX_SLOTS`.
#[derive(Debug, Clone)]
pub struct SlotSet {
    slots: Vec<Slot>,
    next_id: u64,
}

impl Default for SlotSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotSet {
    /// A set holding one empty slot.
    pub fn new() -> Self {
        let mut set = Self {
            slots: Vec::with_capacity(MAX_SLOTS),
            next_id: 0,
        };
        set.push_empty();
        set
    }

    /// Append an empty slot. No-op returning `false` when already full.
    pub fn add(&mut self) -> bool {
        if self.slots.len() >= MAX_SLOTS {
            return false;
        }
        self.push_empty();
        true
    }

    /// Remove the slot at `index`, together with its price history; later
    /// slots shift down by one.
    ///
    /// Removing the only slot replaces it with a fresh empty one.
    pub fn remove(&mut self, index: usize) -> Option<Slot> {
        if index >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(index);
        if self.slots.is_empty() {
            self.push_empty();
        }
        Some(removed)
    }

    /// Only the last slot offers "add", and only while there is room.
    pub fn can_add(&self, index: usize) -> bool {
        self.slots.len() < MAX_SLOTS && index + 1 == self.slots.len()
    }

    /// Back to a single fresh slot. Ids keep increasing.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.push_empty();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn position(&self, id: SlotId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    pub fn find_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Slot> {
        self.slots.iter_mut()
    }

    fn push_empty(&mut self) {
        let id = SlotId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot::new(id));
    }
}

impl<'a> IntoIterator for &'a SlotSet {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
