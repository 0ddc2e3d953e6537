#![allow(dead_code)]

use chrono::NaiveDate;
use macdtrader::domain::analysis::run_analysis;
use macdtrader::domain::config::AnalysisConfig;
use macdtrader::domain::price::PriceSeries;
use macdtrader::domain::table::AnalysisTable;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily series starting 2024-01-01 with the given closes.
pub fn series(close: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    PriceSeries {
        dates: (0..close.len())
            .map(|i| start + chrono::Days::new(i as u64))
            .collect(),
        close: close.to_vec(),
    }
}

/// Closes that oscillate around 100 so MACD crosses its signal line repeatedly.
pub fn wave(n: usize, period: f64) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 10.0 * (i as f64 * std::f64::consts::TAU / period).sin())
        .collect()
}

pub fn default_table() -> AnalysisTable {
    run_analysis(&AnalysisConfig::default()).unwrap()
}

pub fn table_with(days: usize, seed: u64) -> AnalysisTable {
    let mut config = AnalysisConfig::default();
    config.generator.days = days;
    config.seed = seed;
    run_analysis(&config).unwrap()
}
