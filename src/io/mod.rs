//! File exports for reports and saved history.

pub mod export;
