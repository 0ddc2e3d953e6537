//! Crossover signals and carried position state.
//!
//! A bar is an upward crossover when MACD > signal and the previous bar had
//! MACD <= signal; downward is the mirror image. Exact ties match neither
//! and carry the position forward.

use crate::domain::indicator::MacdColumns;

/// Market exposure held after a bar closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Short,
    #[default]
    Flat,
    Long,
}

impl Position {
    pub fn as_i8(self) -> i8 {
        match self {
            Position::Short => -1,
            Position::Flat => 0,
            Position::Long => 1,
        }
    }

    /// Multiplier applied to the next bar's return.
    pub fn exposure(self) -> f64 {
        f64::from(self.as_i8())
    }
}

/// Event emitted on the bar where a crossover is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalFlag {
    Sell,
    #[default]
    Hold,
    Buy,
}

impl SignalFlag {
    pub fn as_i8(self) -> i8 {
        match self {
            SignalFlag::Sell => -1,
            SignalFlag::Hold => 0,
            SignalFlag::Buy => 1,
        }
    }

    pub fn is_trigger(self) -> bool {
        self != SignalFlag::Hold
    }

    /// Position adopted when this flag fires.
    pub fn target(self) -> Option<Position> {
        match self {
            SignalFlag::Sell => Some(Position::Short),
            SignalFlag::Hold => None,
            SignalFlag::Buy => Some(Position::Long),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalColumns {
    pub position: Vec<Position>,
    pub signal_flag: Vec<SignalFlag>,
}

impl SignalColumns {
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn buy_count(&self) -> usize {
        self.signal_flag
            .iter()
            .filter(|&&f| f == SignalFlag::Buy)
            .count()
    }

    pub fn sell_count(&self) -> usize {
        self.signal_flag
            .iter()
            .filter(|&&f| f == SignalFlag::Sell)
            .count()
    }
}

/// Classify the move from `prev` (macd, signal) to `curr` (macd, signal).
pub fn detect_crossover(prev: (f64, f64), curr: (f64, f64)) -> SignalFlag {
    let (prev_macd, prev_signal) = prev;
    let (macd, signal) = curr;
    if macd > signal && prev_macd <= prev_signal {
        SignalFlag::Buy
    } else if macd < signal && prev_macd >= prev_signal {
        SignalFlag::Sell
    } else {
        SignalFlag::Hold
    }
}

pub fn generate_signals(indicators: &MacdColumns) -> SignalColumns {
    let n = indicators.len();
    if n == 0 {
        return SignalColumns::default();
    }

    let pairs: Vec<(f64, f64)> = indicators
        .macd
        .iter()
        .copied()
        .zip(indicators.signal.iter().copied())
        .collect();

    let steps = pairs.windows(2).scan(Position::Flat, |position, w| {
        let flag = detect_crossover(w[0], w[1]);
        if let Some(target) = flag.target() {
            *position = target;
        }
        Some((*position, flag))
    });

    let mut columns = SignalColumns {
        position: Vec::with_capacity(n),
        signal_flag: Vec::with_capacity(n),
    };
    columns.position.push(Position::Flat);
    columns.signal_flag.push(SignalFlag::Hold);
    for (position, flag) in steps {
        columns.position.push(position);
        columns.signal_flag.push(flag);
    }
    columns
}
