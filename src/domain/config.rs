//! Run configuration assembled from a [`ConfigPort`].
//!
//! Sections: `[data]`, `[indicator]`, `[backtest]`, `[report]`. Every key is
//! optional; the defaults reproduce the standard 252-day, seed 42,
//! MACD(12,26,9), $10,000 run.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::backtest::DEFAULT_INITIAL_CAPITAL;
use crate::domain::error::MacdError;
use crate::domain::generator::{self, GeneratorConfig};
use crate::domain::indicator::{EmaWeighting, MacdParams};
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_OUTPUT_DIR: &str = "charts";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub csv_path: Option<PathBuf>,
    pub charts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            csv_path: None,
            charts: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub seed: u64,
    pub generator: GeneratorConfig,
    pub macd: MacdParams,
    pub initial_capital: f64,
    pub report: ReportConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: generator::DEFAULT_SEED,
            generator: GeneratorConfig::default(),
            macd: MacdParams::default(),
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            report: ReportConfig::default(),
        }
    }
}

pub fn parse_date(section: &str, key: &str, value: &str) -> Result<NaiveDate, MacdError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        MacdError::invalid(section, key, "invalid date format (expected YYYY-MM-DD)")
    })
}

fn get_period(config: &dyn ConfigPort, key: &str, default: usize) -> usize {
    config
        .get_int("indicator", key, default as i64)
        .max(0) as usize
}

impl AnalysisConfig {
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, MacdError> {
        let seed = match config.get_string("data", "seed") {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| MacdError::invalid("data", "seed", "expected unsigned integer"))?,
            None => generator::DEFAULT_SEED,
        };

        let start_date = match config.get_string("data", "start_date") {
            Some(s) => parse_date("data", "start_date", &s)?,
            None => generator::default_start_date(),
        };

        let generator = GeneratorConfig {
            days: config
                .get_int("data", "days", generator::DEFAULT_DAYS as i64)
                .max(0) as usize,
            start_date,
            initial_price: config.get_double(
                "data",
                "initial_price",
                generator::DEFAULT_INITIAL_PRICE,
            ),
            mean_return: config.get_double("data", "mean_return", generator::DEFAULT_MEAN_RETURN),
            volatility: config.get_double("data", "volatility", generator::DEFAULT_VOLATILITY),
        };

        let weighting = if config.get_bool("indicator", "adjust", true) {
            EmaWeighting::Adjusted
        } else {
            EmaWeighting::Recursive
        };

        let macd = MacdParams {
            fast: get_period(config, "fast_period", DEFAULT_FAST),
            slow: get_period(config, "slow_period", DEFAULT_SLOW),
            signal: get_period(config, "signal_period", DEFAULT_SIGNAL),
            weighting,
        };

        let report = ReportConfig {
            output_dir: config
                .get_string("report", "output_dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            csv_path: config
                .get_string("report", "csv_path")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            charts: config.get_bool("report", "charts", true),
        };

        Ok(Self {
            seed,
            generator,
            macd,
            initial_capital: config.get_double(
                "backtest",
                "initial_capital",
                DEFAULT_INITIAL_CAPITAL,
            ),
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::ports::config_port::EmptyConfig;

    #[test]
    fn empty_port_gives_defaults() {
        let config = AnalysisConfig::from_port(&EmptyConfig).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn defaults_match_standard_run() {
        let config = AnalysisConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.generator.days, 252);
        assert_eq!(
            config.generator.start_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(config.macd.to_string(), "MACD(12,26,9)");
        assert_eq!(config.initial_capital, 10_000.0);
        assert_eq!(config.report.output_dir, PathBuf::from("charts"));
        assert!(config.report.charts);
    }

    #[test]
    fn reads_all_sections() {
        let ini = r#"
[data]
days = 100
seed = 7
start_date = 2024-03-01
volatility = 0.01

[indicator]
fast_period = 5
slow_period = 35
signal_period = 5
adjust = false

[backtest]
initial_capital = 2500

[report]
output_dir = out
csv_path = out/table.csv
charts = no
"#;
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let config = AnalysisConfig::from_port(&adapter).unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.generator.days, 100);
        assert_eq!(
            config.generator.start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(config.generator.volatility, 0.01);
        assert_eq!(config.macd.fast, 5);
        assert_eq!(config.macd.slow, 35);
        assert_eq!(config.macd.signal, 5);
        assert_eq!(config.macd.weighting, EmaWeighting::Recursive);
        assert_eq!(config.initial_capital, 2500.0);
        assert_eq!(config.report.output_dir, PathBuf::from("out"));
        assert_eq!(config.report.csv_path, Some(PathBuf::from("out/table.csv")));
        assert!(!config.report.charts);
    }

    #[test]
    fn negative_days_clamp_to_zero() {
        let adapter = FileConfigAdapter::from_string("[data]\ndays = -5\n").unwrap();
        let config = AnalysisConfig::from_port(&adapter).unwrap();
        assert_eq!(config.generator.days, 0);
    }

    #[test]
    fn bad_seed_is_invalid() {
        let adapter = FileConfigAdapter::from_string("[data]\nseed = abc\n").unwrap();
        let err = AnalysisConfig::from_port(&adapter).unwrap_err();
        assert!(matches!(err, MacdError::ConfigInvalid { ref key, .. } if key == "seed"));
    }

    #[test]
    fn bad_start_date_is_invalid() {
        let adapter = FileConfigAdapter::from_string("[data]\nstart_date = 01/01/2023\n").unwrap();
        assert!(AnalysisConfig::from_port(&adapter).is_err());
    }
}
