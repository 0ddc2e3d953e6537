//! macdtrader: MACD crossover analysis on a synthetic daily price series.
//!
//! Hexagonal layout: pure pipeline stages in [`domain`], port traits in
//! [`ports`], file and console implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
