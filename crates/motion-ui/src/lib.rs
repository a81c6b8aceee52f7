//! Text presentation layer for the motion log tools.
//!
//! Renders chart views as aligned text tables (or JSON), formats action
//! notices and runs the interactive shell loop.

pub mod app;
pub mod notices;
pub mod table_view;

pub use motion_core as core;
