//! Application lifecycle and execution modes
//!
//! - `lifetime`: startup wiring and shutdown
//! - `modes`: CLI and TUI entry points

pub mod lifetime;
pub mod modes;
