//! The persisted product selection set

use eyre::Result;
use tracing::{debug, warn};

use crate::catalog::Product;
use crate::storage::SlotStore;

/// The user's in-progress cart of chosen products
///
/// Ordered product snapshots with no duplicate ids. Every mutation persists
/// synchronously to the slot store before returning, so the set survives
/// process restarts. Loading is forgiving: a missing or corrupt blob yields
/// an empty set, never an error.
pub struct SelectionSet {
    entries: Vec<Product>,
    store: SlotStore,
}

impl SelectionSet {
    /// Load the selection from the store, recovering to empty on corruption
    pub fn load(store: SlotStore) -> Self {
        let entries = match store.get(crate::SELECTION_KEY) {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, "Corrupt selection blob, resetting to empty");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        debug!(count = entries.len(), "Selection loaded");
        Self { entries, store }
    }

    /// Selected products in selection order
    pub fn products(&self) -> &[Product] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a product id is currently selected
    pub fn is_selected(&self, id: u32) -> bool {
        self.entries.iter().any(|p| p.id == id)
    }

    /// Flip a product in or out of the selection
    ///
    /// Present → removed, absent → a snapshot of the product is appended.
    /// Returns whether the product is selected afterwards.
    pub fn toggle(&mut self, product: &Product) -> Result<bool> {
        let selected = match self.entries.iter().position(|p| p.id == product.id) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(product.clone());
                true
            }
        };
        debug!(id = product.id, selected, "Selection toggled");
        self.save()?;
        Ok(selected)
    }

    /// Remove by position; an out-of-range index is a validated no-op
    ///
    /// The forgiving behavior is intentional: the index comes from a
    /// presentation layer that may be showing a stale list.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "Remove index out of range, ignoring");
            return Ok(false);
        }
        let removed = self.entries.remove(index);
        debug!(id = removed.id, "Selection entry removed");
        self.save()?;
        Ok(true)
    }

    /// Empty the selection unconditionally
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    /// Persist the whole set as one serialized blob (one write per mutation)
    fn save(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.entries)?;
        self.store.put(crate::SELECTION_KEY, &blob)
    }
}
