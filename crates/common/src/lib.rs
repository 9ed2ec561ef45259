//! guirecord common utilities
//!
//! Shared infrastructure for all guirecord crates:
//! - Error types and result aliases
//! - Gap clock for inter-event timing
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
