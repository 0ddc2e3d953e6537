//! Risk and activity statistics for the strategy and buy-and-hold curves.

use crate::domain::signal::Position;
use crate::domain::table::AnalysisTable;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CurveStats {
    pub max_drawdown: f64,
    pub max_drawdown_duration: usize,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub bars_in_market: usize,
    pub market: CurveStats,
    pub strategy: CurveStats,
}

impl Metrics {
    pub fn compute(table: &AnalysisTable) -> Self {
        let bars_in_market = table
            .signals
            .position
            .iter()
            .filter(|&&p| p != Position::Flat)
            .count();

        Self {
            buy_signals: table.signals.buy_count(),
            sell_signals: table.signals.sell_count(),
            bars_in_market,
            market: CurveStats::compute(
                &table.backtest.cumulative_market,
                &table.backtest.returns,
            ),
            strategy: CurveStats::compute(
                &table.backtest.cumulative_strategy,
                &table.backtest.strategy_returns,
            ),
        }
    }
}

impl CurveStats {
    /// `returns[0]` is the placeholder for the undefined first change and is skipped.
    pub fn compute(values: &[f64], returns: &[f64]) -> Self {
        let (max_drawdown, max_drawdown_duration) = compute_drawdown(values);
        let sharpe_ratio = compute_sharpe(returns.get(1..).unwrap_or_default());
        Self {
            max_drawdown,
            max_drawdown_duration,
            sharpe_ratio,
        }
    }
}

/// Largest peak-to-trough decline as a fraction, and the longest run of bars below a peak.
fn compute_drawdown(values: &[f64]) -> (f64, usize) {
    let Some(&first) = values.first() else {
        return (0.0, 0);
    };

    let mut peak = first;
    let mut max_dd = 0.0_f64;
    let mut max_duration = 0usize;
    let mut duration = 0usize;

    for &value in values {
        if value >= peak {
            peak = value;
            duration = 0;
        } else if peak > 0.0 {
            max_dd = max_dd.max((peak - value) / peak);
            duration += 1;
            max_duration = max_duration.max(duration);
        }
    }

    (max_dd, max_duration)
}

/// Annualized mean/stddev of daily returns, zero risk-free rate.
fn compute_sharpe(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        mean / stddev * TRADING_DAYS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}
