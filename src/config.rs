//! TOML-based site configuration and preset definitions.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::budget::{IdGenerator, Quantity};
use crate::catalog::EquipmentCatalog;
use crate::error::BudgetError;
use crate::session::{DEFAULT_DIVERSITY_FACTOR_PCT, Session};

/// Accepted diversity factor range for site inputs (%).
pub const DIVERSITY_RANGE_PCT: RangeInclusive<f64> = 50.0..=100.0;

/// Top-level site configuration parsed from TOML.
///
/// Load from TOML with [`SiteConfig::from_toml_file`] or use one of the
/// built-in presets via [`SiteConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and calculation settings.
    #[serde(default)]
    pub site: SiteSection,
    /// Equipment selections, in report order.
    #[serde(default)]
    pub equipment: Vec<EquipmentRow>,
}

/// Site identity and calculation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Site name; blank is saved as "Unnamed Site".
    pub name: String,
    /// Diversity factor in percent (50–100).
    pub diversity_factor_pct: f64,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: String::new(),
            diversity_factor_pct: DEFAULT_DIVERSITY_FACTOR_PCT,
        }
    }
}

/// One equipment selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EquipmentRow {
    /// Catalog model name.
    pub model: String,
    /// Catalog category; resolved from the model when omitted.
    #[serde(default)]
    pub category: Option<String>,
    /// Unit count (1–20).
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl EquipmentRow {
    fn new(model: &str, quantity: i64) -> Self {
        Self {
            model: model.to_string(),
            category: None,
            quantity,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.diversity_factor_pct"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl SiteConfig {
    /// Two radios and one baseband unit at 80% diversity.
    pub fn demo() -> Self {
        Self {
            site: SiteSection {
                name: "Tower-001-Downtown".to_string(),
                diversity_factor_pct: 80.0,
            },
            equipment: vec![
                EquipmentRow::new("Ericsson 4449 B2", 2),
                EquipmentRow::new("Ericsson DUS 41", 1),
            ],
        }
    }

    /// Five baseband shelves with no diversity credit.
    pub fn macro_site() -> Self {
        Self {
            site: SiteSection {
                name: "Macro-Hub-North".to_string(),
                diversity_factor_pct: 100.0,
            },
            equipment: vec![EquipmentRow::new("Nokia AirScale", 5)],
        }
    }

    /// Street cabinet with small cells and auxiliary gear.
    pub fn small_cell() -> Self {
        Self {
            site: SiteSection {
                name: "Street-Cabinet-12".to_string(),
                diversity_factor_pct: 70.0,
            },
            equipment: vec![
                EquipmentRow::new("Small Cell", 4),
                EquipmentRow::new("GPS Unit", 1),
                EquipmentRow::new("Microwave ODU", 1),
                EquipmentRow::new("Alarm Panel", 1),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "macro_site", "small_cell"];

    /// Loads a site from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "macro_site" => Ok(Self::macro_site()),
            "small_cell" => Ok(Self::small_cell()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a site from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "site".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a site from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Model names are
    /// checked against the catalog later, in [`SiteConfig::apply`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let pct = self.site.diversity_factor_pct;
        if !DIVERSITY_RANGE_PCT.contains(&pct) {
            errors.push(ConfigError {
                field: "site.diversity_factor_pct".into(),
                message: format!(
                    "must be in [{}, {}], got {pct}",
                    DIVERSITY_RANGE_PCT.start(),
                    DIVERSITY_RANGE_PCT.end()
                ),
            });
        }

        if self.equipment.is_empty() {
            errors.push(ConfigError {
                field: "equipment".into(),
                message: "must list at least one item".into(),
            });
        }

        for (i, row) in self.equipment.iter().enumerate() {
            if row.model.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("equipment[{i}].model"),
                    message: "must not be empty".into(),
                });
            }
            if Quantity::try_from(row.quantity).is_err() {
                errors.push(ConfigError {
                    field: format!("equipment[{i}].quantity"),
                    message: format!(
                        "must be in [{}, {}], got {}",
                        Quantity::MIN,
                        Quantity::MAX,
                        row.quantity
                    ),
                });
            }
        }

        errors
    }

    /// Replaces the session's live list and settings with this site.
    ///
    /// Every row is resolved before the session is touched.
    ///
    /// # Errors
    ///
    /// Returns the first `BudgetError` raised while resolving equipment; the
    /// session's list, name and diversity factor are then unchanged.
    pub fn apply<G: IdGenerator>(&self, session: &mut Session<G>) -> Result<(), BudgetError> {
        session.load_items(|aggregator, empty| {
            self.equipment.iter().try_fold(empty, |list, row| {
                let quantity = Quantity::try_from(row.quantity)?.get();
                match &row.category {
                    Some(category) => aggregator.add_item(&list, category, &row.model, quantity),
                    None => aggregator.add_model(&list, &row.model, quantity),
                }
            })
        })?;
        session.set_site_name(self.site.name.clone());
        session.set_diversity_factor_pct(self.site.diversity_factor_pct);
        Ok(())
    }

    /// Builds a fresh session over `catalog` populated with this site.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::apply`].
    pub fn build_session(&self, catalog: Arc<EquipmentCatalog>) -> Result<Session, BudgetError> {
        let mut session = Session::with_catalog(catalog);
        self.apply(&mut session)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_preset_valid() {
        let cfg = SiteConfig::demo();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "demo should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = SiteConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in SiteConfig::PRESETS {
            let cfg = SiteConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[site]
name = "Tower-42"
diversity_factor_pct = 75

[[equipment]]
model = "Nokia FSMF"
category = "Radio Units"
quantity = 3

[[equipment]]
model = "GPS Unit"
"#;
        let cfg = SiteConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.site.name.as_str()), Some("Tower-42"));
        assert_eq!(cfg.as_ref().map(|c| c.site.diversity_factor_pct), Some(75.0));
        assert_eq!(cfg.as_ref().map(|c| c.equipment.len()), Some(2));
        // quantity defaults to 1
        assert_eq!(cfg.as_ref().map(|c| c.equipment[1].quantity), Some(1));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[[equipment]]
model = "Alarm Panel"
quantity = 2
"#;
        let cfg = SiteConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.site.diversity_factor_pct), Some(80.0));
        assert_eq!(cfg.as_ref().map(|c| c.site.name.is_empty()), Some(true));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[site]
name = "X"
bus_voltage = 24
"#;
        assert!(SiteConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_diversity_out_of_range() {
        let mut cfg = SiteConfig::demo();
        cfg.site.diversity_factor_pct = 45.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "site.diversity_factor_pct"));
    }

    #[test]
    fn validation_collects_every_bad_row() {
        let mut cfg = SiteConfig::demo();
        cfg.equipment[0].quantity = 0;
        cfg.equipment[1].quantity = 21;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "equipment[0].quantity"));
        assert!(errors.iter().any(|e| e.field == "equipment[1].quantity"));
    }

    #[test]
    fn validation_requires_equipment() {
        let cfg = SiteConfig::default();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "equipment"));
    }

    #[test]
    fn build_session_resolves_models() {
        let session = SiteConfig::demo()
            .build_session(Arc::new(EquipmentCatalog::builtin()))
            .expect("demo should build");
        assert_eq!(session.items().len(), 2);
        assert_eq!(session.site_name(), "Tower-001-Downtown");
        assert_eq!(session.result().map(|r| r.total_watts), Some(950.0));
    }

    #[test]
    fn failed_apply_keeps_session_state() {
        let mut session = SiteConfig::demo()
            .build_session(Arc::new(EquipmentCatalog::builtin()))
            .expect("demo should build");
        let before = session.items().clone();

        let mut cfg = SiteConfig::macro_site();
        cfg.equipment.push(EquipmentRow::new("Mystery Box", 1));
        assert_eq!(
            cfg.apply(&mut session),
            Err(BudgetError::ModelNotFound("Mystery Box".into()))
        );

        let mut cfg = SiteConfig::macro_site();
        cfg.equipment[0].quantity = 0;
        assert!(matches!(
            cfg.apply(&mut session),
            Err(BudgetError::InvalidQuantity(_))
        ));

        assert_eq!(session.items(), &before);
        assert_eq!(session.site_name(), "Tower-001-Downtown");
        assert_eq!(session.diversity_factor_pct(), 80.0);
    }

    #[test]
    fn apply_replaces_previous_site() {
        let mut session = SiteConfig::demo()
            .build_session(Arc::new(EquipmentCatalog::builtin()))
            .expect("demo should build");
        SiteConfig::macro_site()
            .apply(&mut session)
            .expect("macro_site should apply");
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.site_name(), "Macro-Hub-North");
        assert_eq!(session.result().map(|r| r.total_watts), Some(2500.0));
    }

    #[test]
    fn build_session_reports_unknown_model() {
        let mut cfg = SiteConfig::demo();
        cfg.equipment.push(EquipmentRow::new("Mystery Box", 1));
        let err = cfg.build_session(Arc::new(EquipmentCatalog::builtin()));
        assert_eq!(
            err.map(|s| s.items().len()),
            Err(BudgetError::ModelNotFound("Mystery Box".into()))
        );
    }
}
