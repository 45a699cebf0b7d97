//! Error types for catalog lookups and equipment-list operations.

use thiserror::Error;

/// Rejection of a single catalog or equipment-list operation.
///
/// Every variant leaves the caller's state untouched: list operations
/// return a new list only on success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BudgetError {
    /// The category name does not exist in the catalog.
    #[error("unknown equipment category \"{0}\"")]
    CategoryNotFound(String),

    /// The model name does not exist (in any category, or in the given one).
    #[error("unknown equipment model \"{0}\"")]
    ModelNotFound(String),

    /// Quantity is non-numeric or outside `1..=20`.
    #[error("invalid quantity \"{0}\": expected an integer in 1..=20")]
    InvalidQuantity(String),
}

impl BudgetError {
    /// Returns `true` for the lookup failures (`CategoryNotFound`, `ModelNotFound`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound(_) | Self::ModelNotFound(_))
    }
}

/// Convenience alias used across the engine.
pub type Result<T> = std::result::Result<T, BudgetError>;
