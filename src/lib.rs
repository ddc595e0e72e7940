//! Aquacast library
//!
//! Normalized weather aggregates for irrigation scheduling: a trailing-day
//! watering summary, a multi-day forecast summary, and inputs for a
//! reference-ET estimate. Exposed as a library so the binary and the
//! integration tests share one implementation.

pub mod cli;
pub mod data;
pub mod provider;
pub mod solar;
