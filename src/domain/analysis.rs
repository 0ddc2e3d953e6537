//! End-to-end pipeline: generate, indicators, signals, backtest.

use rand::SeedableRng;

use crate::domain::backtest::run_backtest;
use crate::domain::config::AnalysisConfig;
use crate::domain::error::MacdError;
use crate::domain::generator::{SeriesRng, generate_prices};
use crate::domain::indicator::calculate_macd;
use crate::domain::price::PriceSeries;
use crate::domain::signal::generate_signals;
use crate::domain::table::AnalysisTable;

/// A pipeline stage about to start, reported to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Indicators,
    Signals,
    Backtest,
}

/// Run every stage after generation over an existing price series.
pub fn analyze_prices(prices: PriceSeries, config: &AnalysisConfig) -> AnalysisTable {
    analyze_prices_with(prices, config, |_| {})
}

/// [`analyze_prices`], calling `on_stage` before each stage starts.
pub fn analyze_prices_with<F>(
    prices: PriceSeries,
    config: &AnalysisConfig,
    mut on_stage: F,
) -> AnalysisTable
where
    F: FnMut(Stage),
{
    on_stage(Stage::Indicators);
    let indicators = calculate_macd(&prices.close, &config.macd);
    on_stage(Stage::Signals);
    let signals = generate_signals(&indicators);
    on_stage(Stage::Backtest);
    let backtest = run_backtest(&prices, &signals, config.initial_capital);
    AnalysisTable {
        prices,
        indicators,
        signals,
        backtest,
    }
}

/// The seeded synthetic series for `config`.
pub fn generate_series(config: &AnalysisConfig) -> Result<PriceSeries, MacdError> {
    let mut rng = SeriesRng::seed_from_u64(config.seed);
    generate_prices(&mut rng, &config.generator)
}

/// Generate the seeded synthetic series and analyze it.
pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisTable, MacdError> {
    Ok(analyze_prices(generate_series(config)?, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::SignalFlag;

    #[test]
    fn default_run_has_252_rows() {
        let table = run_analysis(&AnalysisConfig::default()).unwrap();
        assert_eq!(table.len(), 252);
        assert_eq!(table.indicators.len(), 252);
        assert_eq!(table.signals.len(), 252);
        assert_eq!(table.backtest.len(), 252);
    }

    #[test]
    fn marker_rows_match_flags() {
        let table = run_analysis(&AnalysisConfig::default()).unwrap();
        let buys = table.buy_rows();
        let sells = table.sell_rows();
        assert_eq!(buys.len(), table.signals.buy_count());
        assert_eq!(sells.len(), table.signals.sell_count());
        assert!(buys.iter().all(|r| r.signal_flag == SignalFlag::Buy));
        assert!(sells.iter().all(|r| r.signal_flag == SignalFlag::Sell));
    }

    #[test]
    fn row_out_of_range_is_none() {
        let table = run_analysis(&AnalysisConfig::default()).unwrap();
        assert!(table.row(252).is_none());
        assert!(table.row(0).is_some());
    }

    #[test]
    fn zero_days_gives_empty_table() {
        let mut config = AnalysisConfig::default();
        config.generator.days = 0;
        let table = run_analysis(&config).unwrap();
        assert!(table.is_empty());
        assert!(table.summary().final_strategy.is_nan());
    }

    #[test]
    fn stages_report_in_pipeline_order() {
        let config = AnalysisConfig::default();
        let prices = generate_series(&config).unwrap();
        let mut seen = Vec::new();
        let table = analyze_prices_with(prices.clone(), &config, |stage| seen.push(stage));
        assert_eq!(seen, vec![Stage::Indicators, Stage::Signals, Stage::Backtest]);
        assert_eq!(table, analyze_prices(prices, &config));
    }

    #[test]
    fn negative_volatility_fails_before_any_stage() {
        let mut config = AnalysisConfig::default();
        config.generator.volatility = -0.02;
        assert!(matches!(
            run_analysis(&config),
            Err(MacdError::ConfigInvalid { .. })
        ));
    }
}
