//! Synthetic daily price generator.
//!
//! Returns are i.i.d. normal draws; price[0] = initial_price and
//! price[i] = price[i-1] * (1 + r[i]). One draw is taken per day, the
//! draw for day 0 is consumed but never applied.
//!
//! The draw stream comes from [`SeriesRng`], a ChaCha8 generator whose output
//! for a given seed is fixed across crate versions and platforms.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::error::MacdError;
use crate::domain::price::PriceSeries;

pub const DEFAULT_DAYS: usize = 252;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_INITIAL_PRICE: f64 = 100.0;
pub const DEFAULT_MEAN_RETURN: f64 = 0.001;
pub const DEFAULT_VOLATILITY: f64 = 0.02;

pub type SeriesRng = ChaCha8Rng;

pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub days: usize,
    pub start_date: NaiveDate,
    pub initial_price: f64,
    pub mean_return: f64,
    pub volatility: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            start_date: default_start_date(),
            initial_price: DEFAULT_INITIAL_PRICE,
            mean_return: DEFAULT_MEAN_RETURN,
            volatility: DEFAULT_VOLATILITY,
        }
    }
}

pub fn generate_prices<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<PriceSeries, MacdError> {
    if !(config.volatility >= 0.0 && config.volatility.is_finite()) {
        return Err(MacdError::invalid(
            "data",
            "volatility",
            format!("must be finite and non-negative, got {}", config.volatility),
        ));
    }
    let normal = Normal::new(config.mean_return, config.volatility)
        .map_err(|e| MacdError::invalid("data", "volatility", e.to_string()))?;

    let returns: Vec<f64> = (0..config.days).map(|_| normal.sample(rng)).collect();

    let mut dates = Vec::with_capacity(config.days);
    let mut close = Vec::with_capacity(config.days);
    let mut date = config.start_date;
    let mut price = config.initial_price;

    for (i, r) in returns.iter().enumerate() {
        if i > 0 {
            date = date
                .checked_add_days(Days::new(1))
                .ok_or_else(|| MacdError::invalid("data", "days", "date range overflows"))?;
            price *= 1.0 + r;
        }
        dates.push(date);
        close.push(price);
    }

    Ok(PriceSeries { dates, close })
}
