//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use dc_load::catalog::EquipmentCatalog;
use dc_load::logging;
use dc_load::session::Session;

/// Built-in catalog behind an `Arc`, with test logging installed.
pub fn builtin_catalog() -> Arc<EquipmentCatalog> {
    logging::init_test();
    Arc::new(EquipmentCatalog::builtin())
}

/// Two Ericsson 4449 B2 radios and one DUS 41 at 80% diversity (950 W).
pub fn demo_session() -> Session {
    let mut session = Session::with_catalog(builtin_catalog());
    session.set_site_name("Tower-001");
    session.set_diversity_factor_pct(80.0);
    session
        .add("Radio Units", "Ericsson 4449 B2", 2)
        .expect("radio should be in the catalog");
    session
        .add("BBU/Controller", "Ericsson DUS 41", 1)
        .expect("baseband should be in the catalog");
    session
}

/// Fixed timestamp used for deterministic reports.
pub fn stamp(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid timestamp")
}

/// Absolute path to a file shipped with the crate (sites, catalogs).
pub fn asset(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Value after `label` on the first stdout line starting with it, with
/// `unit` stripped.
pub fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    raw.trim_end_matches(unit)
        .trim()
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed to parse `{raw}` for `{label}`"))
}
