//! Aggregated dashboard views and their placeholder inputs.

pub mod aggregator;
pub mod placeholder;

pub use aggregator::*;
