//! Signalforge - multi-factor technical-analysis scorer producing trading
//! recommendations.

pub mod config;
pub mod error;
pub mod report;
pub mod services;
pub mod sources;
pub mod types;

pub use error::{AppError, Result};
pub use types::*;
