//! `kc-common` — Shared types, errors, and configuration for the keepcut editing core.
//!
//! This crate is the foundation the timeline crate depends on:
//!
//! - **Types**: `TimeOffset` (integer microseconds, exact arithmetic)
//! - **Errors**: `TimelineError`, `TimelineResult` (thiserror-based)
//! - **Config**: `TimelineConfig`

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{TimelineConfig, DEFAULT_MAX_HISTORY_DEPTH};
pub use error::{TimelineError, TimelineResult};
pub use types::TimeOffset;
