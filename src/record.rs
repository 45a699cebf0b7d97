//! Saved calculation snapshots and the most-recent-first history.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::budget::{BudgetFigures, BudgetResult, EquipmentList, Id};

/// Site name stored when the caller leaves it blank.
pub const UNNAMED_SITE: &str = "Unnamed Site";

/// Immutable snapshot of one completed budget.
///
/// Owns its own copy of the equipment list; later edits to the live list
/// cannot reach it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRecord {
    id: Id,
    site_name: String,
    timestamp: NaiveDateTime,
    items: EquipmentList,
    diversity_factor_pct: f64,
    result: BudgetResult,
}

impl CalculationRecord {
    /// Creates a record, substituting [`UNNAMED_SITE`] for a blank site name.
    /// Other names are stored as entered.
    pub fn new(
        id: Id,
        site_name: &str,
        timestamp: NaiveDateTime,
        items: &EquipmentList,
        diversity_factor_pct: f64,
        result: BudgetResult,
    ) -> Self {
        let site_name = if site_name.trim().is_empty() {
            UNNAMED_SITE.to_string()
        } else {
            site_name.to_string()
        };
        Self {
            id,
            site_name,
            timestamp,
            items: items.clone(),
            diversity_factor_pct,
            result,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Local wall-clock time of the save.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn items(&self) -> &EquipmentList {
        &self.items
    }

    pub fn diversity_factor_pct(&self) -> f64 {
        self.diversity_factor_pct
    }

    pub fn result(&self) -> &BudgetResult {
        &self.result
    }

    pub fn figures(&self) -> BudgetFigures {
        self.result.figures()
    }
}

/// Saved records, most recent first. Unbounded.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: VecDeque<CalculationRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a record and returns it.
    pub fn push(&mut self, record: CalculationRecord) -> &CalculationRecord {
        self.records.push_front(record);
        &self.records[0]
    }

    /// Most recently saved record.
    pub fn latest(&self) -> Option<&CalculationRecord> {
        self.records.front()
    }

    pub fn get(&self, id: &Id) -> Option<&CalculationRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Records in most-recent-first order.
    pub fn iter(&self) -> impl Iterator<Item = &CalculationRecord> {
        self.records.iter()
    }

    /// At most `n` of the most recent records.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &CalculationRecord> {
        self.records.iter().take(n)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
