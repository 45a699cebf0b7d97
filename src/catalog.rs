//! Equipment reference data: category → model → rated power and load class.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::error::{BudgetError, Result};

/// Functional classification of a piece of site equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadClass {
    #[serde(rename = "LTE")]
    Lte,
    #[serde(rename = "5G")]
    FiveG,
    Controller,
    Power,
    Timing,
    Backhaul,
    Capacity,
    Monitoring,
}

impl fmt::Display for LoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Lte => "LTE",
            Self::FiveG => "5G",
            Self::Controller => "Controller",
            Self::Power => "Power",
            Self::Timing => "Timing",
            Self::Backhaul => "Backhaul",
            Self::Capacity => "Capacity",
            Self::Monitoring => "Monitoring",
        };
        f.write_str(s)
    }
}

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentEntry {
    pub category: String,
    pub model: String,
    /// Nameplate DC draw per unit (W, > 0).
    pub rated_power_w: f64,
    pub load_class: LoadClass,
}

/// Read-only equipment catalog.
///
/// Categories and the models inside each keep their insertion order, which
/// is the order presented to callers and the order `lookup` searches in.
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    categories: Vec<Category>,
}

#[derive(Debug, Clone)]
struct Category {
    name: String,
    entries: Vec<EquipmentEntry>,
}

/// Flat TOML row used by catalog files.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogRow {
    category: String,
    model: String,
    power_w: f64,
    class: LoadClass,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    equipment: Vec<CatalogRow>,
}

const BUILTIN: &[(&str, &str, f64, LoadClass)] = &[
    ("Radio Units", "Ericsson 4449 B2", 250.0, LoadClass::Lte),
    ("Radio Units", "Ericsson 4402 B66", 200.0, LoadClass::Lte),
    ("Radio Units", "Nokia FSMF", 300.0, LoadClass::FiveG),
    ("Radio Units", "Nokia FRGY", 275.0, LoadClass::FiveG),
    ("Radio Units", "Huawei AAU5613", 280.0, LoadClass::FiveG),
    ("Radio Units", "Samsung RU-MT6101", 240.0, LoadClass::Lte),
    ("BBU/Controller", "Ericsson DUS 41", 450.0, LoadClass::Controller),
    ("BBU/Controller", "Nokia AirScale", 500.0, LoadClass::Controller),
    ("BBU/Controller", "Huawei BBU5900", 480.0, LoadClass::Controller),
    ("BBU/Controller", "ZTE ZXSDR BS8200", 420.0, LoadClass::Controller),
    ("Auxiliary Equipment", "DC-DC Converter", 50.0, LoadClass::Power),
    ("Auxiliary Equipment", "GPS Unit", 15.0, LoadClass::Timing),
    ("Auxiliary Equipment", "Microwave ODU", 80.0, LoadClass::Backhaul),
    ("Auxiliary Equipment", "Small Cell", 30.0, LoadClass::Capacity),
    ("Auxiliary Equipment", "Alarm Panel", 10.0, LoadClass::Monitoring),
];

impl Default for EquipmentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EquipmentCatalog {
    /// Returns the built-in catalog of common radio, baseband and auxiliary units.
    pub fn builtin() -> Self {
        let mut catalog = Self {
            categories: Vec::new(),
        };
        for &(category, model, rated_power_w, load_class) in BUILTIN {
            catalog.push(EquipmentEntry {
                category: category.to_string(),
                model: model.to_string(),
                rated_power_w,
                load_class,
            });
        }
        catalog
    }

    /// Parses a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or its contents are invalid.
    pub fn from_toml_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "catalog".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            categories = catalog.categories.len(),
            models = catalog.len(),
            "loaded equipment catalog"
        );
        Ok(catalog)
    }

    /// Parses a catalog from TOML made of `[[equipment]]` rows.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for malformed TOML, unknown fields, non-positive
    /// power, a duplicate `(category, model)` pair, or an empty catalog.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })?;
        if file.equipment.is_empty() {
            return Err(ConfigError {
                field: "equipment".to_string(),
                message: "catalog must contain at least one entry".to_string(),
            });
        }

        let mut catalog = Self {
            categories: Vec::new(),
        };
        for (i, row) in file.equipment.into_iter().enumerate() {
            if !(row.power_w > 0.0 && row.power_w.is_finite()) {
                return Err(ConfigError {
                    field: format!("equipment[{i}].power_w"),
                    message: "must be > 0".to_string(),
                });
            }
            if catalog.lookup_in(&row.category, &row.model).is_ok() {
                return Err(ConfigError {
                    field: format!("equipment[{i}].model"),
                    message: format!(
                        "duplicate model \"{}\" in category \"{}\"",
                        row.model, row.category
                    ),
                });
            }
            catalog.push(EquipmentEntry {
                category: row.category,
                model: row.model,
                rated_power_w: row.power_w,
                load_class: row.class,
            });
        }
        Ok(catalog)
    }

    fn push(&mut self, entry: EquipmentEntry) {
        match self.categories.iter_mut().find(|c| c.name == entry.category) {
            Some(category) => category.entries.push(entry),
            None => self.categories.push(Category {
                name: entry.category.clone(),
                entries: vec![entry],
            }),
        }
    }

    /// Finds a model in any category (first match in category order).
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` if no category lists the model.
    pub fn lookup(&self, model: &str) -> Result<&EquipmentEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.entries.iter())
            .find(|e| e.model == model)
            .ok_or_else(|| BudgetError::ModelNotFound(model.to_string()))
    }

    /// Finds a model within one category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` or `ModelNotFound`.
    pub fn lookup_in(&self, category: &str, model: &str) -> Result<&EquipmentEntry> {
        self.models(category)?
            .iter()
            .find(|e| e.model == model)
            .ok_or_else(|| BudgetError::ModelNotFound(model.to_string()))
    }

    /// Category names in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// Models of one category, in catalog order, with their rated power.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` for an unknown category.
    pub fn models(&self, category: &str) -> Result<&[EquipmentEntry]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.entries.as_slice())
            .ok_or_else(|| BudgetError::CategoryNotFound(category.to_string()))
    }

    /// Total number of models across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Returns `true` if the catalog holds no models.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
