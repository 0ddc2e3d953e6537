//! CSV export of the enriched table.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::error::MacdError;
use crate::domain::table::{AnalysisTable, Record};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct CsvRow {
    date: String,
    close: f64,
    ema_fast: f64,
    ema_slow: f64,
    macd: f64,
    signal: f64,
    histogram: f64,
    position: i8,
    signal_flag: i8,
    returns: f64,
    strategy_returns: f64,
    cumulative_market: f64,
    cumulative_strategy: f64,
}

impl From<Record> for CsvRow {
    fn from(r: Record) -> Self {
        Self {
            date: r.date.format("%Y-%m-%d").to_string(),
            close: r.close,
            ema_fast: r.ema_fast,
            ema_slow: r.ema_slow,
            macd: r.macd,
            signal: r.signal,
            histogram: r.histogram,
            position: r.position.as_i8(),
            signal_flag: r.signal_flag.as_i8(),
            returns: r.returns,
            strategy_returns: r.strategy_returns,
            cumulative_market: r.cumulative_market,
            cumulative_strategy: r.cumulative_strategy,
        }
    }
}

fn csv_error(path: &Path, e: impl std::fmt::Display) -> MacdError {
    MacdError::Report {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportPort for CsvAdapter {
    fn write(&self, table: &AnalysisTable) -> Result<Vec<PathBuf>, MacdError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut wtr = csv::Writer::from_path(&self.path).map_err(|e| csv_error(&self.path, e))?;
        for record in table.rows() {
            wtr.serialize(CsvRow::from(record))
                .map_err(|e| csv_error(&self.path, e))?;
        }
        wtr.flush().map_err(|e| csv_error(&self.path, e))?;
        Ok(vec![self.path.clone()])
    }
}
