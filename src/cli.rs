//! CLI definition and pipeline driver.
//!
//! With no arguments the standard analysis runs: 252 synthetic days, seed 42,
//! MACD(12,26,9), $10,000 starting capital, charts written to `charts/`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_report::{self, SAMPLE_ROWS};
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::analysis::{Stage, analyze_prices_with, generate_series};
use crate::domain::config::AnalysisConfig;
use crate::domain::config_validation::validate_config;
use crate::domain::error::MacdError;
use crate::domain::metrics::Metrics;
use crate::domain::table::AnalysisTable;
use crate::ports::config_port::{ConfigPort, EmptyConfig};
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug, Default)]
#[command(name = "macdtrader", about = "MACD crossover analysis on a synthetic price series")]
pub struct Cli {
    /// INI file overriding the built-in defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory for the SVG charts
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Number of synthetic trading days
    #[arg(long)]
    pub days: Option<usize>,
    /// Random seed for the price generator
    #[arg(long)]
    pub seed: Option<u64>,
    /// Also export the enriched table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Skip chart generation
    #[arg(long)]
    pub no_charts: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    match run_pipeline(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Merge defaults, the optional config file and command line overrides.
pub fn build_config(cli: &Cli) -> Result<AnalysisConfig, MacdError> {
    let file_adapter = match &cli.config {
        Some(path) => Some(FileConfigAdapter::from_file(path)?),
        None => None,
    };
    let port: &dyn ConfigPort = match &file_adapter {
        Some(adapter) => adapter,
        None => &EmptyConfig,
    };

    let mut config = AnalysisConfig::from_port(port)?;
    if let Some(days) = cli.days {
        config.generator.days = days;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(output) = &cli.output {
        config.report.output_dir = output.clone();
    }
    if let Some(csv) = &cli.csv {
        config.report.csv_path = Some(csv.clone());
    }
    if cli.no_charts {
        config.report.charts = false;
    }

    validate_config(&config)?;
    Ok(config)
}

pub fn run_pipeline(cli: &Cli) -> Result<AnalysisTable, MacdError> {
    println!("=== MACD INDICATOR ANALYSIS ===");
    let config = build_config(cli)?;
    if let Some(path) = &cli.config {
        println!("Loaded config from {}", path.display());
    }
    println!("Indicator: {}", config.macd);

    // Stage 1: Generate
    println!("Generating sample data...");
    let prices = generate_series(&config)?;
    println!("Data loaded: {} days", prices.len());

    // Stage 2: Indicators, signals, backtest
    let table = analyze_prices_with(prices, &config, |stage| match stage {
        Stage::Indicators => println!("Calculating MACD indicator..."),
        Stage::Signals => println!("Generating buy/sell signals..."),
        Stage::Backtest => println!("Running backtest..."),
    });
    let metrics = Metrics::compute(&table);

    // Stage 3: Console report
    print!("{}", console_report::format_summary(&table.summary()));
    println!();
    print!("{}", console_report::format_sample(&table, SAMPLE_ROWS));
    println!();
    print!("{}", console_report::format_signal_counts(&metrics));
    println!();
    print!("{}", console_report::format_metrics(&metrics));

    // Stage 4: Files
    if let Some(csv_path) = &config.report.csv_path {
        for path in CsvAdapter::new(csv_path).write(&table)? {
            println!("Table written to: {}", path.display());
        }
    }

    if config.report.charts {
        println!("\nGenerating plots...");
        let charts = SvgChartAdapter::new(
            &config.report.output_dir,
            config.macd.fast,
            config.macd.slow,
        );
        for path in charts.write(&table)? {
            println!("  {}", path.display());
        }
    }

    println!();
    print!("{}", console_report::closing_notes());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_flags_gives_defaults() {
        let config = build_config(&Cli::default()).unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[data]\ndays = 50\nseed = 3\n").unwrap();
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            days: Some(80),
            no_charts: true,
            ..Cli::default()
        };
        let config = build_config(&cli).unwrap();
        assert_eq!(config.generator.days, 80);
        assert_eq!(config.seed, 3);
        assert!(!config.report.charts);
    }

    #[test]
    fn invalid_file_value_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[indicator]\nfast_period = 30\n").unwrap();
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };
        assert!(matches!(
            build_config(&cli),
            Err(MacdError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "macdtrader",
            "--days",
            "100",
            "--seed",
            "9",
            "-o",
            "out",
            "--no-charts",
        ])
        .unwrap();
        assert_eq!(cli.days, Some(100));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.output, Some(PathBuf::from("out")));
        assert!(cli.no_charts);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_no_flags() {
        let cli = Cli::try_parse_from(["macdtrader"]).unwrap();
        assert!(cli.days.is_none());
        assert!(!cli.no_charts);
    }
}
