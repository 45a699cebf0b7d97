//! Diversity-adjusted load, DC current, and rectifier sizing.

use super::types::{BudgetFigures, BudgetResult, EquipmentList, Recommendation};

/// Nominal DC distribution voltage (V).
pub const BUS_VOLTAGE_V: f64 = 48.0;

/// Utilization at or above which a larger rectifier is recommended.
pub const UTILIZATION_HEADROOM: f64 = 0.8;

/// Ascending `(max dc_amps inclusive, rectifier amps)` steps.
const RECTIFIER_STEPS: [(f64, u32); 4] = [(20.0, 30), (40.0, 60), (70.0, 100), (130.0, 200)];

/// Computes the budget for `list` at the fixed 48 V bus.
///
/// The diversity factor is used as given; range checks belong to the caller.
/// An empty list yields a well-formed zero result.
///
/// # Examples
///
/// ```
/// use dc_load::budget::calculator::compute;
/// use dc_load::budget::types::{EquipmentList, Recommendation};
///
/// let r = compute(&EquipmentList::new(), 80.0);
/// assert_eq!(r.total_watts, 0.0);
/// assert_eq!(r.rectifier_size_amps, 30);
/// assert_eq!(r.recommendation, Recommendation::Adequate);
/// ```
pub fn compute(list: &EquipmentList, diversity_factor_pct: f64) -> BudgetResult {
    compute_at(list, diversity_factor_pct, BUS_VOLTAGE_V)
}

/// Computes the budget at an arbitrary bus voltage.
pub fn compute_at(
    list: &EquipmentList,
    diversity_factor_pct: f64,
    bus_voltage_v: f64,
) -> BudgetResult {
    let total_watts = list.total_power_w();
    let diversity_watts = total_watts * diversity_factor_pct / 100.0;
    let dc_amps = diversity_watts / bus_voltage_v;
    let rectifier_size_amps = rectifier_size_amps(dc_amps);

    BudgetResult {
        total_watts,
        diversity_watts,
        dc_amps,
        rectifier_size_amps,
        rectifier_utilization_pct: dc_amps / f64::from(rectifier_size_amps) * 100.0,
        recommendation: recommend(dc_amps, rectifier_size_amps),
    }
}

/// Smallest rectifier step that covers `dc_amps`.
///
/// Boundaries are inclusive; above the last step the size is `dc_amps`
/// rounded up to the next multiple of 100 A.
pub fn rectifier_size_amps(dc_amps: f64) -> u32 {
    RECTIFIER_STEPS
        .iter()
        .find(|&&(max_amps, _)| dc_amps <= max_amps)
        .map_or_else(
            || ((dc_amps / 100.0).ceil() * 100.0) as u32,
            |&(_, size)| size,
        )
}

/// `Adequate` strictly below 80% of the rectifier size.
pub fn recommend(dc_amps: f64, rectifier_size_amps: u32) -> Recommendation {
    if dc_amps < f64::from(rectifier_size_amps) * UTILIZATION_HEADROOM {
        Recommendation::Adequate
    } else {
        Recommendation::ConsiderLarger
    }
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

impl BudgetResult {
    /// Rounded view for reports, exports and API responses.
    pub fn figures(&self) -> BudgetFigures {
        BudgetFigures {
            total_w: round_to(self.total_watts, 0),
            effective_w: round_to(self.diversity_watts, 0),
            dc_amps: round_to(self.dc_amps, 2),
            rectifier_a: self.rectifier_size_amps,
            utilization_pct: round_to(self.rectifier_utilization_pct, 1),
            recommendation: self.recommendation,
        }
    }
}
