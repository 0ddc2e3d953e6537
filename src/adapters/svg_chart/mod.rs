//! SVG chart rendering of the enriched series.
//!
//! Four charts: price with EMAs and signal markers, MACD against its signal
//! line, the histogram, and strategy against buy-and-hold value.

pub mod plot;

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::MacdError;
use crate::domain::signal::SignalFlag;
use crate::domain::table::AnalysisTable;
use crate::ports::report_port::ReportPort;
use plot::{Frame, Marker};

pub const PRICE_CHART: &str = "price_signals.svg";
pub const MACD_CHART: &str = "macd_signal.svg";
pub const HISTOGRAM_CHART: &str = "histogram.svg";
pub const PERFORMANCE_CHART: &str = "performance.svg";

const TALL: f64 = 360.0;
const SHORT: f64 = 240.0;

fn marker_points(table: &AnalysisTable, flag: SignalFlag, column: &[f64]) -> Vec<(usize, f64)> {
    table
        .indices_with_flag(flag)
        .into_iter()
        .filter_map(|i| column.get(i).map(|&v| (i, v)))
        .collect()
}

fn signal_markers(table: &AnalysisTable, frame: &Frame, column: &[f64], size: f64) -> String {
    let mut out = plot::markers(
        frame,
        &marker_points(table, SignalFlag::Buy, column),
        "green",
        Marker::Up,
        size,
    );
    out.push_str(&plot::markers(
        frame,
        &marker_points(table, SignalFlag::Sell, column),
        "red",
        Marker::Down,
        size,
    ));
    out
}

pub fn price_chart(table: &AnalysisTable, fast: usize, slow: usize) -> String {
    let prices = &table.prices;
    let ind = &table.indicators;
    let frame = Frame::fit(
        table.len(),
        prices.close.iter().chain(&ind.ema_fast).chain(&ind.ema_slow),
        TALL,
    );
    let fast_label = format!("EMA Fast ({fast})");
    let slow_label = format!("EMA Slow ({slow})");

    let mut body = plot::axes(&frame, &prices.dates, "Stock Price with MACD Signals", "Price ($)", None);
    body.push_str(&plot::polyline(&frame, &prices.close, "black", 2.0, 1.0));
    body.push_str(&plot::polyline(&frame, &ind.ema_fast, "blue", 1.0, 0.7));
    body.push_str(&plot::polyline(&frame, &ind.ema_slow, "red", 1.0, 0.7));
    body.push_str(&signal_markers(table, &frame, &prices.close, 10.0));
    body.push_str(&plot::legend(&[
        ("Close Price", "black"),
        (fast_label.as_str(), "blue"),
        (slow_label.as_str(), "red"),
        ("Buy Signal", "green"),
        ("Sell Signal", "red"),
    ]));
    plot::document(&frame, &body)
}

pub fn macd_chart(table: &AnalysisTable) -> String {
    let ind = &table.indicators;
    let frame = Frame::fit(
        table.len(),
        ind.macd.iter().chain(&ind.signal).chain(std::iter::once(&0.0)),
        TALL,
    );

    let mut body = plot::axes(&frame, &table.prices.dates, "MACD and Signal Lines", "MACD Value", None);
    body.push_str(&plot::hline(&frame, 0.0, "black", 0.3));
    body.push_str(&plot::polyline(&frame, &ind.macd, "blue", 2.0, 1.0));
    body.push_str(&plot::polyline(&frame, &ind.signal, "red", 2.0, 1.0));
    body.push_str(&signal_markers(table, &frame, &ind.macd, 8.0));
    body.push_str(&plot::legend(&[("MACD Line", "blue"), ("Signal Line", "red")]));
    plot::document(&frame, &body)
}

pub fn histogram_chart(table: &AnalysisTable) -> String {
    let histogram = &table.indicators.histogram;
    let frame = Frame::fit(
        table.len(),
        histogram.iter().chain(std::iter::once(&0.0)),
        SHORT,
    );

    let mut body = plot::axes(&frame, &table.prices.dates, "MACD Histogram", "Value", None);
    body.push_str(&plot::bars(&frame, histogram, "green", "red"));
    plot::document(&frame, &body)
}

pub fn performance_chart(table: &AnalysisTable) -> String {
    let bt = &table.backtest;
    let frame = Frame::fit(
        table.len(),
        bt.cumulative_market.iter().chain(&bt.cumulative_strategy),
        TALL,
    );

    let mut body = plot::axes(
        &frame,
        &table.prices.dates,
        "Strategy Performance Comparison",
        "Portfolio Value ($)",
        Some("Date"),
    );
    body.push_str(&plot::polyline(&frame, &bt.cumulative_market, "blue", 2.0, 1.0));
    body.push_str(&plot::polyline(&frame, &bt.cumulative_strategy, "green", 2.0, 1.0));
    body.push_str(&plot::legend(&[
        ("Buy & Hold Strategy", "blue"),
        ("MACD Strategy", "green"),
    ]));
    plot::document(&frame, &body)
}

/// Writes the four charts into a directory, creating it if needed.
pub struct SvgChartAdapter {
    output_dir: PathBuf,
    fast: usize,
    slow: usize,
}

impl SvgChartAdapter {
    pub fn new(output_dir: impl Into<PathBuf>, fast: usize, slow: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            fast,
            slow,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn write_chart(&self, name: &str, content: &str) -> Result<PathBuf, MacdError> {
        let path = self.output_dir.join(name);
        fs::write(&path, content).map_err(|e| MacdError::Report {
            reason: format!("failed to write {}: {}", path.display(), e),
        })?;
        Ok(path)
    }
}

impl ReportPort for SvgChartAdapter {
    fn write(&self, table: &AnalysisTable) -> Result<Vec<PathBuf>, MacdError> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(vec![
            self.write_chart(PRICE_CHART, &price_chart(table, self.fast, self.slow))?,
            self.write_chart(MACD_CHART, &macd_chart(table))?,
            self.write_chart(HISTOGRAM_CHART, &histogram_chart(table))?,
            self.write_chart(PERFORMANCE_CHART, &performance_chart(table))?,
        ])
    }
}
