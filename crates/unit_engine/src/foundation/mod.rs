//! Foundation utilities shared across the engine
//!
//! - Math aliases and helpers (`nalgebra`-backed)
//! - Frame timing
//! - Logging initialization

pub mod logging;
pub mod math;
pub mod time;
