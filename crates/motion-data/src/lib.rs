//! Data layer for motion-log.
//!
//! Parses session documents, flattens them into table rows, persists and
//! re-reads the `;`-separated table, and derives the chart views from it.

pub mod aggregator;
pub mod conversion;
pub mod discovery;
pub mod document;
pub mod flatten;
pub mod table;

pub use motion_core as core;
