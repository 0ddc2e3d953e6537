//! Configuration validation.
//!
//! Runs on the assembled [`AnalysisConfig`], after file values and command
//! line overrides have been merged.

use crate::domain::config::AnalysisConfig;
use crate::domain::error::MacdError;

pub fn validate_config(config: &AnalysisConfig) -> Result<(), MacdError> {
    validate_periods(config)?;
    validate_generator(config)?;
    validate_initial_capital(config)?;
    Ok(())
}

fn validate_periods(config: &AnalysisConfig) -> Result<(), MacdError> {
    let params = &config.macd;
    for (key, value) in [
        ("fast_period", params.fast),
        ("slow_period", params.slow),
        ("signal_period", params.signal),
    ] {
        if value == 0 {
            return Err(MacdError::invalid(
                "indicator",
                key,
                format!("{key} must be positive"),
            ));
        }
    }
    if params.fast >= params.slow {
        return Err(MacdError::invalid(
            "indicator",
            "fast_period",
            "fast_period must be less than slow_period",
        ));
    }
    Ok(())
}

fn validate_generator(config: &AnalysisConfig) -> Result<(), MacdError> {
    let generator = &config.generator;
    if !(generator.initial_price > 0.0 && generator.initial_price.is_finite()) {
        return Err(MacdError::invalid(
            "data",
            "initial_price",
            "initial_price must be positive",
        ));
    }
    if !generator.mean_return.is_finite() {
        return Err(MacdError::invalid(
            "data",
            "mean_return",
            "mean_return must be finite",
        ));
    }
    if !(generator.volatility >= 0.0 && generator.volatility.is_finite()) {
        return Err(MacdError::invalid(
            "data",
            "volatility",
            "volatility must be non-negative",
        ));
    }
    Ok(())
}

fn validate_initial_capital(config: &AnalysisConfig) -> Result<(), MacdError> {
    let value = config.initial_capital;
    if !(value >= 0.0 && value.is_finite()) {
        return Err(MacdError::invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be non-negative",
        ));
    }
    Ok(())
}
