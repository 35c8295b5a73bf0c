//! shortkeep - shorten URLs through Bitly and keep the short links locally
//! until their chosen expiration passes.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//! - **tui**: Terminal user interface (default)
//!
//! # Architecture
//! - `storage`: link records and the device-local key-value store
//! - `services`: shortening client, expiration scheduler, link service
//! - `interfaces`: User interfaces (CLI, TUI)
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: logging setup

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
