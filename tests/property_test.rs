//! Property tests over arbitrary price paths and indicator series.

mod common;

use common::series;
use macdtrader::domain::backtest::run_backtest;
use macdtrader::domain::indicator::{EmaWeighting, MacdColumns, calculate_macd_default, ewm_mean};
use macdtrader::domain::signal::{SignalFlag, detect_crossover, generate_signals};
use proptest::prelude::*;

fn price_path() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.05f64..0.05, 1..200).prop_map(|returns| {
        let mut price = 100.0;
        returns
            .into_iter()
            .map(|r| {
                price *= 1.0 + r;
                price
            })
            .collect()
    })
}

fn indicator_columns() -> impl Strategy<Value = MacdColumns> {
    prop::collection::vec((-5i32..5, -5i32..5), 0..100).prop_map(|pairs| {
        // small integers so exact ties show up
        let macd: Vec<f64> = pairs.iter().map(|&(m, _)| f64::from(m)).collect();
        let signal: Vec<f64> = pairs.iter().map(|&(_, s)| f64::from(s)).collect();
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();
        MacdColumns {
            ema_fast: vec![0.0; macd.len()],
            ema_slow: vec![0.0; macd.len()],
            macd,
            signal,
            histogram,
        }
    })
}

proptest! {
    #[test]
    fn ema_preserves_length_and_bounds(values in prop::collection::vec(1.0f64..1000.0, 0..150), span in 1usize..50) {
        for weighting in [EmaWeighting::Adjusted, EmaWeighting::Recursive] {
            let ema = ewm_mean(&values, span, weighting);
            prop_assert_eq!(ema.len(), values.len());
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            for v in ema {
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
            }
        }
    }

    #[test]
    fn histogram_identity_holds(close in price_path()) {
        let ind = calculate_macd_default(&close);
        for i in 0..close.len() {
            prop_assert_eq!(ind.histogram[i], ind.macd[i] - ind.signal[i]);
        }
    }

    #[test]
    fn crossover_conditions_are_exclusive(a in -10.0f64..10.0, b in -10.0f64..10.0, c in -10.0f64..10.0, d in -10.0f64..10.0) {
        let up = c > d && a <= b;
        let down = c < d && a >= b;
        prop_assert!(!(up && down));
        let flag = detect_crossover((a, b), (c, d));
        prop_assert_eq!(flag == SignalFlag::Buy, up);
        prop_assert_eq!(flag == SignalFlag::Sell, down);
    }

    #[test]
    fn position_changes_imply_flag(cols in indicator_columns()) {
        let sig = generate_signals(&cols);
        prop_assert_eq!(sig.len(), cols.len());
        for i in 1..sig.len() {
            if sig.position[i] != sig.position[i - 1] {
                prop_assert!(sig.signal_flag[i].is_trigger());
            }
            match sig.signal_flag[i].target() {
                Some(target) => prop_assert_eq!(sig.position[i], target),
                None => prop_assert_eq!(sig.position[i], sig.position[i - 1]),
            }
        }
    }

    #[test]
    fn backtest_starts_at_capital(close in price_path(), capital in 1.0f64..1e6) {
        let prices = series(&close);
        let signals = generate_signals(&calculate_macd_default(&close));
        let bt = run_backtest(&prices, &signals, capital);
        prop_assert_eq!(bt.len(), close.len());
        prop_assert_eq!(bt.cumulative_market[0], capital);
        prop_assert_eq!(bt.cumulative_strategy[0], capital);
        prop_assert!(bt.cumulative_market.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn recomputation_is_identical(close in price_path()) {
        let a = calculate_macd_default(&close);
        let b = calculate_macd_default(&close);
        prop_assert_eq!(generate_signals(&a), generate_signals(&b));
        prop_assert_eq!(a, b);
    }
}
