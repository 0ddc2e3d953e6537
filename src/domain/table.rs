//! The enriched time series: every stage's columns side by side.

use chrono::NaiveDate;

use crate::domain::backtest::{BacktestColumns, BacktestSummary};
use crate::domain::indicator::MacdColumns;
use crate::domain::price::PriceSeries;
use crate::domain::signal::{Position, SignalColumns, SignalFlag};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTable {
    pub prices: PriceSeries,
    pub indicators: MacdColumns,
    pub signals: SignalColumns,
    pub backtest: BacktestColumns,
}

/// One row of the table, joined across column groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    pub close: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub position: Position,
    pub signal_flag: SignalFlag,
    pub returns: f64,
    pub strategy_returns: f64,
    pub cumulative_market: f64,
    pub cumulative_strategy: f64,
}

impl AnalysisTable {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `None` past the end of any column group.
    pub fn row(&self, i: usize) -> Option<Record> {
        Some(Record {
            date: *self.prices.dates.get(i)?,
            close: *self.prices.close.get(i)?,
            ema_fast: *self.indicators.ema_fast.get(i)?,
            ema_slow: *self.indicators.ema_slow.get(i)?,
            macd: *self.indicators.macd.get(i)?,
            signal: *self.indicators.signal.get(i)?,
            histogram: *self.indicators.histogram.get(i)?,
            position: *self.signals.position.get(i)?,
            signal_flag: *self.signals.signal_flag.get(i)?,
            returns: *self.backtest.returns.get(i)?,
            strategy_returns: *self.backtest.strategy_returns.get(i)?,
            cumulative_market: *self.backtest.cumulative_market.get(i)?,
            cumulative_strategy: *self.backtest.cumulative_strategy.get(i)?,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }

    /// Indices of the bars where `flag` fired.
    pub fn indices_with_flag(&self, flag: SignalFlag) -> Vec<usize> {
        self.signals
            .signal_flag
            .iter()
            .enumerate()
            .filter(|&(_, &f)| f == flag)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn rows_with_flag(&self, flag: SignalFlag) -> Vec<Record> {
        self.indices_with_flag(flag)
            .into_iter()
            .filter_map(|i| self.row(i))
            .collect()
    }

    pub fn buy_rows(&self) -> Vec<Record> {
        self.rows_with_flag(SignalFlag::Buy)
    }

    pub fn sell_rows(&self) -> Vec<Record> {
        self.rows_with_flag(SignalFlag::Sell)
    }

    pub fn summary(&self) -> BacktestSummary {
        self.backtest.summary()
    }
}
