//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Default parameters: fast=12, slow=26, signal=9. Every column is defined
//! from the first bar; there is no leading gap.

use std::fmt;

use crate::domain::indicator::{EmaWeighting, ewm_mean};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub weighting: EmaWeighting,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
            weighting: EmaWeighting::Adjusted,
        }
    }
}

impl fmt::Display for MacdParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MACD({},{},{})", self.fast, self.slow, self.signal)
    }
}

/// Indicator columns, index-aligned with the close series they came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MacdColumns {
    pub ema_fast: Vec<f64>,
    pub ema_slow: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdColumns {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

pub fn calculate_macd(close: &[f64], params: &MacdParams) -> MacdColumns {
    let ema_fast = ewm_mean(close, params.fast, params.weighting);
    let ema_slow = ewm_mean(close, params.slow, params.weighting);

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = ewm_mean(&macd, params.signal, params.weighting);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    MacdColumns {
        ema_fast,
        ema_slow,
        macd,
        signal,
        histogram,
    }
}

pub fn calculate_macd_default(close: &[f64]) -> MacdColumns {
    calculate_macd(close, &MacdParams::default())
}
