//! DC power budget and rectifier sizing for telecom cell sites.
//!
//! Equipment is picked from an [`catalog::EquipmentCatalog`], aggregated into
//! an immutable [`budget::EquipmentList`], and turned into a
//! [`budget::BudgetResult`] by [`budget::compute`]. A [`session::Session`]
//! ties these together and keeps the saved calculation history.

pub mod budget;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod record;
pub mod report;
pub mod session;

/// HTTP API (enabled with the `api` feature).
#[cfg(feature = "api")]
pub mod api;
