//! Technical indicators: exponential moving averages and MACD.

pub mod ema;
pub mod macd;

pub use ema::{EmaWeighting, ewm_mean, smoothing_factor};
pub use macd::{MacdColumns, MacdParams, calculate_macd, calculate_macd_default};
