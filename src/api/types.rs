//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::budget::{BudgetFigures, BudgetResult, EquipmentList};
use crate::catalog::EquipmentEntry;

/// One category and its models, in catalog order.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub name: String,
    pub models: Vec<EquipmentEntry>,
}

/// One selection in a budget request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRequest {
    /// Catalog model name.
    pub model: String,
    /// Optional category; resolved from the model when absent.
    #[serde(default)]
    pub category: Option<String>,
    /// Unit count (1–20).
    pub quantity: i64,
}

/// Body of `POST /budget` and `POST /report`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BudgetRequest {
    #[serde(default)]
    pub site_name: String,
    /// Diversity factor (%); defaults to 80.
    #[serde(default)]
    pub diversity_factor_pct: Option<f64>,
    #[serde(default)]
    pub items: Vec<ItemRequest>,
}

/// Computed budget with both full-precision and rounded figures.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    pub site_name: String,
    pub diversity_factor_pct: f64,
    pub items: EquipmentList,
    pub result: BudgetResult,
    pub figures: BudgetFigures,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
