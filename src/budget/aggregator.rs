//! Turns catalog selections into equipment lists and power totals.

use std::sync::Arc;

use crate::catalog::EquipmentCatalog;
use crate::error::Result;

use super::ids::{IdGenerator, SequentialIds};
use super::types::{EquipmentList, Id, Quantity, SelectedItem};

/// Builds equipment lists from catalog selections.
///
/// Generic over the id source so callers choose between deterministic and
/// random tokens. The catalog is shared read-only.
#[derive(Debug, Clone)]
pub struct LoadAggregator<G: IdGenerator = SequentialIds> {
    catalog: Arc<EquipmentCatalog>,
    ids: G,
}

impl<G: IdGenerator> LoadAggregator<G> {
    pub fn new(catalog: Arc<EquipmentCatalog>, ids: G) -> Self {
        Self { catalog, ids }
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    /// Draws the next token from the injected generator.
    pub fn next_id(&mut self) -> Id {
        self.ids.next_id()
    }

    /// Returns `list` plus `quantity` units of `model` from `category`.
    ///
    /// # Errors
    ///
    /// `CategoryNotFound` / `ModelNotFound` if the selection does not resolve,
    /// `InvalidQuantity` outside `1..=20`. No id is consumed on failure.
    pub fn add_item(
        &mut self,
        list: &EquipmentList,
        category: &str,
        model: &str,
        quantity: u32,
    ) -> Result<EquipmentList> {
        let entry = self.catalog.lookup_in(category, model)?;
        let quantity = Quantity::new(quantity)?;
        let item = SelectedItem::new(self.ids.next_id(), entry, quantity);
        Ok(list.with(item))
    }

    /// Like [`add_item`](Self::add_item), resolving the category from the model.
    ///
    /// # Errors
    ///
    /// `ModelNotFound` or `InvalidQuantity`.
    pub fn add_model(
        &mut self,
        list: &EquipmentList,
        model: &str,
        quantity: u32,
    ) -> Result<EquipmentList> {
        let entry = self.catalog.lookup(model)?;
        let quantity = Quantity::new(quantity)?;
        let item = SelectedItem::new(self.ids.next_id(), entry, quantity);
        Ok(list.with(item))
    }
}

/// Returns `list` without the entry matching `id`; unknown ids are a no-op.
pub fn remove_item(list: &EquipmentList, id: &Id) -> EquipmentList {
    list.without(id)
}

/// Sum of item totals (W).
pub fn total_power(list: &EquipmentList) -> f64 {
    list.total_power_w()
}
