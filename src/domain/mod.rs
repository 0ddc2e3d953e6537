//! Core domain types and pipeline stages.

pub mod price;
pub mod generator;
pub mod indicator;
pub mod signal;
pub mod backtest;
pub mod table;
pub mod metrics;
pub mod analysis;
pub mod config;
pub mod config_validation;
pub mod error;
