//! Core engine services
//!
//! Currently hosts the configuration system; the read-only view passed to
//! every component's `awake` lives here.

pub mod config;

pub use config::{ConfigValue, ConfigView};
