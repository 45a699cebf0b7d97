//! Fixed-layout text report for a saved calculation.

use std::fmt;

use chrono::NaiveDate;

use crate::record::CalculationRecord;

const RULE: &str = "--------------------------------";

/// Display adapter rendering a [`CalculationRecord`] as the text report.
pub struct Report<'a>(pub &'a CalculationRecord);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        let figures = record.figures();
        let ts = record.timestamp();

        writeln!(f, "DC LOAD CALCULATION REPORT")?;
        writeln!(f, "================================")?;
        writeln!(f)?;
        writeln!(f, "Site Name: {}", record.site_name())?;
        writeln!(f, "Date: {}", ts.format("%Y-%m-%d"))?;
        writeln!(f, "Time: {}", ts.format("%H:%M:%S"))?;
        writeln!(f)?;

        writeln!(f, "EQUIPMENT LIST:")?;
        writeln!(f, "{RULE}")?;
        for (idx, item) in record.items().iter().enumerate() {
            writeln!(f, "{}. {}", idx + 1, item.model())?;
            writeln!(f, "   Category: {}", item.category())?;
            writeln!(
                f,
                "   Power: {}W × {} = {}W",
                item.rated_power_w(),
                item.quantity(),
                item.total_power_w()
            )?;
            writeln!(f)?;
        }

        writeln!(f, "POWER CALCULATIONS:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Total Power (100%): {:.0} W", figures.total_w)?;
        writeln!(f, "Diversity Factor: {}%", record.diversity_factor_pct())?;
        writeln!(f, "Effective Power: {:.0} W", figures.effective_w)?;
        writeln!(f, "DC Current @ -48VDC: {:.2} A", figures.dc_amps)?;
        writeln!(f)?;

        writeln!(f, "RECTIFIER RECOMMENDATION:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Recommended Size: {} A", figures.rectifier_a)?;
        writeln!(f, "Utilization: {:.1}%", figures.utilization_pct)?;
        writeln!(f, "Status: {}", figures.recommendation)?;
        writeln!(f)?;

        writeln!(f, "Notes:")?;
        writeln!(f, "- Calculation assumes -48VDC system")?;
        writeln!(f, "- Diversity factor applied to total load")?;
        writeln!(f, "- Recommend 20% margin for future growth")
    }
}

/// Renders the text report for `record`.
pub fn format(record: &CalculationRecord) -> String {
    Report(record).to_string()
}

/// Export file name: `DC_Load_<site>_<YYYY-MM-DD>.txt`.
///
/// A blank site name becomes `Report`; path separators are replaced with `-`.
pub fn report_file_name(site_name: &str, date: NaiveDate) -> String {
    let site = match site_name.trim() {
        "" => "Report".to_string(),
        name => name.replace(['/', '\\'], "-"),
    };
    format!("DC_Load_{site}_{}.txt", date.format("%Y-%m-%d"))
}
