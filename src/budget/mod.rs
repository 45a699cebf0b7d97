/// Selection-to-list aggregation and power totals.
pub mod aggregator;
/// Diversity, current conversion, and rectifier sizing.
pub mod calculator;
pub mod ids;
pub mod types;

pub use aggregator::LoadAggregator;
pub use calculator::compute;
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use types::{
    BudgetFigures, BudgetResult, EquipmentList, Id, Quantity, Recommendation, SelectedItem,
};
