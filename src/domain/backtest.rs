//! Position-following backtest against a buy-and-hold baseline.
//!
//! The position held at the close of bar i-1 earns bar i's return, so a
//! crossover on bar i is first applied to bar i+1.

use crate::domain::price::PriceSeries;
use crate::domain::signal::SignalColumns;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BacktestColumns {
    pub initial_capital: f64,
    pub returns: Vec<f64>,
    pub strategy_returns: Vec<f64>,
    pub cumulative_market: Vec<f64>,
    pub cumulative_strategy: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSummary {
    pub initial_capital: f64,
    pub final_market: f64,
    pub final_strategy: f64,
    pub market_return_pct: f64,
    pub strategy_return_pct: f64,
}

impl BacktestSummary {
    pub fn outperformance_pct(&self) -> f64 {
        self.strategy_return_pct - self.market_return_pct
    }
}

pub fn run_backtest(
    prices: &PriceSeries,
    signals: &SignalColumns,
    initial_capital: f64,
) -> BacktestColumns {
    let returns = prices.pct_change();

    let strategy_returns: Vec<f64> = returns
        .iter()
        .enumerate()
        .map(|(i, r)| {
            if i == 0 {
                0.0
            } else {
                let held = signals.position.get(i - 1).copied().unwrap_or_default();
                held.exposure() * r
            }
        })
        .collect();

    BacktestColumns {
        initial_capital,
        cumulative_market: compound(&returns, initial_capital),
        cumulative_strategy: compound(&strategy_returns, initial_capital),
        returns,
        strategy_returns,
    }
}

/// Running value of `capital` compounded by each return in turn.
fn compound(returns: &[f64], capital: f64) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0, |growth, r| {
            *growth *= 1.0 + r;
            Some(capital * *growth)
        })
        .collect()
}

fn total_return_pct(final_value: f64, initial_capital: f64) -> f64 {
    (final_value / initial_capital - 1.0) * 100.0
}

impl BacktestColumns {
    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    /// Final values are NaN when there are no bars.
    pub fn summary(&self) -> BacktestSummary {
        let final_market = self.cumulative_market.last().copied().unwrap_or(f64::NAN);
        let final_strategy = self
            .cumulative_strategy
            .last()
            .copied()
            .unwrap_or(f64::NAN);

        BacktestSummary {
            initial_capital: self.initial_capital,
            final_market,
            final_strategy,
            market_return_pct: total_return_pct(final_market, self.initial_capital),
            strategy_return_pct: total_return_pct(final_strategy, self.initial_capital),
        }
    }
}
