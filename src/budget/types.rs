//! Core budget types: selections, equipment lists, and calculation results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::EquipmentEntry;
use crate::error::{BudgetError, Result};

/// Opaque unique token identifying a selected item or a saved record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit count of one selection, always within `1..=20`.
///
/// # Examples
///
/// ```
/// use dc_load::budget::types::Quantity;
///
/// assert_eq!(Quantity::new(3).map(Quantity::get), Ok(3));
/// assert!(Quantity::new(0).is_err());
/// assert!("abc".parse::<Quantity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;

    /// Validates a unit count.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` outside `1..=20`.
    pub fn new(n: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(BudgetError::InvalidQuantity(n.to_string()))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = BudgetError;

    fn try_from(n: i64) -> Result<Self> {
        u32::try_from(n)
            .map_err(|_| BudgetError::InvalidQuantity(n.to_string()))
            .and_then(Self::new)
    }
}

impl FromStr for Quantity {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .map_err(|_| BudgetError::InvalidQuantity(s.to_string()))
            .and_then(Self::new)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One confirmed equipment selection.
///
/// `total_power_w` is derived from `rated_power_w * quantity` on every
/// construction; there is no way to set it independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedItem {
    id: Id,
    category: String,
    model: String,
    rated_power_w: f64,
    quantity: Quantity,
    total_power_w: f64,
}

impl SelectedItem {
    /// Creates a selection of `quantity` units of a catalog entry.
    pub fn new(id: Id, entry: &EquipmentEntry, quantity: Quantity) -> Self {
        Self {
            id,
            category: entry.category.clone(),
            model: entry.model.clone(),
            rated_power_w: entry.rated_power_w,
            quantity,
            total_power_w: entry.rated_power_w * f64::from(quantity.get()),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Per-unit rated draw (W).
    pub fn rated_power_w(&self) -> f64 {
        self.rated_power_w
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Rated draw times quantity (W).
    pub fn total_power_w(&self) -> f64 {
        self.total_power_w
    }
}

/// Ordered list of selections with persistent-update operations.
///
/// Every modifying operation returns a new list and leaves `self` alone, so
/// a list captured in a saved record can never be altered afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EquipmentList {
    items: Vec<SelectedItem>,
}

impl EquipmentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new list with `item` appended.
    pub fn with(&self, item: SelectedItem) -> Self {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend(self.items.iter().cloned());
        items.push(item);
        Self { items }
    }

    /// Returns a new list without the entry matching `id`.
    ///
    /// An unknown id yields an identical list.
    pub fn without(&self, id: &Id) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != id)
                .cloned()
                .collect(),
        }
    }

    pub fn get(&self, id: &Id) -> Option<&SelectedItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item totals (W); 0 for an empty list.
    pub fn total_power_w(&self) -> f64 {
        self.items.iter().map(SelectedItem::total_power_w).sum()
    }
}

impl<'a> IntoIterator for &'a EquipmentList {
    type Item = &'a SelectedItem;
    type IntoIter = std::slice::Iter<'a, SelectedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Qualitative rectifier sizing verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Required current is below 80% of the selected rectifier.
    Adequate,
    /// Required current is at or above 80% of the selected rectifier.
    ConsiderLarger,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adequate => f.write_str("Adequate"),
            Self::ConsiderLarger => f.write_str("Consider larger rectifier"),
        }
    }
}

/// Full-precision outcome of one budget computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetResult {
    /// Nameplate sum of all selections (W).
    pub total_watts: f64,
    /// Diversity-adjusted design load (W).
    pub diversity_watts: f64,
    /// Design current at the bus voltage (A).
    pub dc_amps: f64,
    /// Selected rectifier plant size (A).
    pub rectifier_size_amps: u32,
    /// `dc_amps / rectifier_size_amps * 100`.
    pub rectifier_utilization_pct: f64,
    pub recommendation: Recommendation,
}

/// Presentation view of a [`BudgetResult`], rounded half away from zero.
///
/// Watts to whole units, current to 2 decimals, utilization to 1 decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetFigures {
    pub total_w: f64,
    pub effective_w: f64,
    pub dc_amps: f64,
    pub rectifier_a: u32,
    pub utilization_pct: f64,
    pub recommendation: Recommendation,
}
