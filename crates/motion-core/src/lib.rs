//! Shared types for motion-log.
//!
//! Session document and flat-row models, the error type, CLI settings, lenient
//! JSON field coercion and display formatting.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
