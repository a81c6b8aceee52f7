//! Runtime layer for motion-log.
//!
//! Owns the shell's session state and the convert / load / chart actions that
//! read and replace it.

pub mod actions;
pub mod session_state;

pub use motion_core as core;
pub use motion_data as data;
