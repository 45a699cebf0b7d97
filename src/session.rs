//! Single-owner session state: live equipment list, settings, and history.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::budget::{
    BudgetResult, EquipmentList, Id, IdGenerator, LoadAggregator, SequentialIds, compute,
};
use crate::catalog::EquipmentCatalog;
use crate::error::Result;
use crate::record::{CalculationRecord, History};
use crate::report;

/// Diversity factor applied until the caller sets one (%).
pub const DEFAULT_DIVERSITY_FACTOR_PCT: f64 = 80.0;

/// One logical user session.
///
/// All mutation goes through `&mut self`; sessions are never shared, so no
/// locking is involved. Failed operations leave every field unchanged.
#[derive(Debug)]
pub struct Session<G: IdGenerator = SequentialIds> {
    aggregator: LoadAggregator<G>,
    items: EquipmentList,
    site_name: String,
    diversity_factor_pct: f64,
    history: History,
}

impl Session {
    /// Session with sequential ids over `catalog`.
    pub fn with_catalog(catalog: Arc<EquipmentCatalog>) -> Self {
        Self::new(catalog, SequentialIds::new())
    }
}

impl<G: IdGenerator> Session<G> {
    pub fn new(catalog: Arc<EquipmentCatalog>, ids: G) -> Self {
        Self {
            aggregator: LoadAggregator::new(catalog, ids),
            items: EquipmentList::new(),
            site_name: String::new(),
            diversity_factor_pct: DEFAULT_DIVERSITY_FACTOR_PCT,
            history: History::new(),
        }
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        self.aggregator.catalog()
    }

    /// Adds `quantity` units of `model` from `category`; returns the new item id.
    ///
    /// # Errors
    ///
    /// `CategoryNotFound`, `ModelNotFound` or `InvalidQuantity`.
    pub fn add(&mut self, category: &str, model: &str, quantity: u32) -> Result<Id> {
        let items = self
            .aggregator
            .add_item(&self.items, category, model, quantity)?;
        Ok(self.replace_items(items))
    }

    /// Adds `quantity` units of `model`, resolving its category from the catalog.
    ///
    /// # Errors
    ///
    /// `ModelNotFound` or `InvalidQuantity`.
    pub fn add_model(&mut self, model: &str, quantity: u32) -> Result<Id> {
        let items = self.aggregator.add_model(&self.items, model, quantity)?;
        Ok(self.replace_items(items))
    }

    fn replace_items(&mut self, items: EquipmentList) -> Id {
        self.items = items;
        let added = &self.items.items()[self.items.len() - 1];
        tracing::debug!(
            id = %added.id(),
            model = added.model(),
            quantity = added.quantity().get(),
            total_w = added.total_power_w(),
            "equipment added"
        );
        added.id().clone()
    }

    /// Removes the item with `id`. Returns `false` (and changes nothing) if absent.
    pub fn remove(&mut self, id: &Id) -> bool {
        let before = self.items.len();
        self.items = self.items.without(id);
        let removed = self.items.len() != before;
        tracing::debug!(id = %id, removed, "equipment remove requested");
        removed
    }

    /// Replaces the live list with the one `build` produces from an empty
    /// list, or leaves it alone if `build` fails.
    ///
    /// # Errors
    ///
    /// Whatever `build` returns.
    pub fn load_items<F>(&mut self, build: F) -> Result<()>
    where
        F: FnOnce(&mut LoadAggregator<G>, EquipmentList) -> Result<EquipmentList>,
    {
        let items = build(&mut self.aggregator, EquipmentList::new())?;
        tracing::debug!(count = items.len(), "equipment list loaded");
        self.items = items;
        Ok(())
    }

    /// Empties the live list; saved records are unaffected.
    pub fn clear_items(&mut self) {
        self.items = EquipmentList::new();
    }

    pub fn items(&self) -> &EquipmentList {
        &self.items
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn set_site_name(&mut self, name: impl Into<String>) {
        self.site_name = name.into();
    }

    pub fn diversity_factor_pct(&self) -> f64 {
        self.diversity_factor_pct
    }

    /// Stores the diversity factor as given; see [`crate::config::DIVERSITY_RANGE_PCT`]
    /// for the range callers are expected to enforce.
    pub fn set_diversity_factor_pct(&mut self, pct: f64) {
        self.diversity_factor_pct = pct;
    }

    /// Current budget, or `None` while the list is empty.
    pub fn result(&self) -> Option<BudgetResult> {
        if self.items.is_empty() {
            return None;
        }
        Some(compute(&self.items, self.diversity_factor_pct))
    }

    /// Saves the current budget stamped with the local time.
    pub fn save(&mut self) -> Option<&CalculationRecord> {
        self.save_at(Local::now().naive_local())
    }

    /// Saves the current budget with an explicit timestamp.
    ///
    /// Returns `None` without touching the history when the list is empty.
    pub fn save_at(&mut self, timestamp: NaiveDateTime) -> Option<&CalculationRecord> {
        let result = self.result()?;
        let record = CalculationRecord::new(
            self.aggregator.next_id(),
            &self.site_name,
            timestamp,
            &self.items,
            self.diversity_factor_pct,
            result,
        );
        tracing::info!(
            id = %record.id(),
            site = record.site_name(),
            dc_amps = record.figures().dc_amps,
            rectifier_a = result.rectifier_size_amps,
            "calculation saved"
        );
        Some(self.history.push(record))
    }

    /// Text report of the most recently saved record.
    pub fn latest_report(&self) -> Option<String> {
        self.history.latest().map(report::format)
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
