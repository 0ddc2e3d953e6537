//! Plain-text report blocks printed to the terminal.

use crate::domain::backtest::BacktestSummary;
use crate::domain::metrics::Metrics;
use crate::domain::table::AnalysisTable;

pub const SAMPLE_ROWS: usize = 30;

/// `1234567.891` -> `1,234,567.89`. Non-finite values print as-is.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:.2}");
    }
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, &b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(b as char);
    }

    let sign = if value.is_sign_negative() && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

pub fn format_currency(value: f64) -> String {
    format!("${}", format_thousands(value))
}

pub fn format_summary(summary: &BacktestSummary) -> String {
    format!(
        "=== BACKTEST RESULTS ===\n\
         Initial Capital: {}\n\
         Final Market Value: {}\n\
         Final Strategy Value: {}\n\
         Buy & Hold Return: {:.2}%\n\
         MACD Strategy Return: {:.2}%\n\
         Strategy Outperformance: {:.2}%\n",
        format_currency(summary.initial_capital),
        format_currency(summary.final_market),
        format_currency(summary.final_strategy),
        summary.market_return_pct,
        summary.strategy_return_pct,
        summary.outperformance_pct(),
    )
}

pub fn format_sample(table: &AnalysisTable, limit: usize) -> String {
    let mut out = String::from("=== SAMPLE DATA ===\n");
    out.push_str(&format!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>12}\n",
        "Date", "Close", "MACD", "Signal", "Histogram", "Signal_Flag"
    ));
    for record in table.rows().take(limit) {
        out.push_str(&format!(
            "{:<10} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>12}\n",
            record.date.format("%Y-%m-%d").to_string(),
            record.close,
            record.macd,
            record.signal,
            record.histogram,
            record.signal_flag.as_i8(),
        ));
    }
    out
}

pub fn format_signal_counts(metrics: &Metrics) -> String {
    format!(
        "Total Buy Signals: {}\nTotal Sell Signals: {}\n",
        metrics.buy_signals, metrics.sell_signals
    )
}

pub fn format_metrics(metrics: &Metrics) -> String {
    format!(
        "=== RISK METRICS ===\n\
         Bars In Market: {}\n\
         Buy & Hold Max Drawdown: -{:.2}% ({} bars)\n\
         MACD Strategy Max Drawdown: -{:.2}% ({} bars)\n\
         Buy & Hold Sharpe Ratio: {:.2}\n\
         MACD Strategy Sharpe Ratio: {:.2}\n",
        metrics.bars_in_market,
        metrics.market.max_drawdown * 100.0,
        metrics.market.max_drawdown_duration,
        metrics.strategy.max_drawdown * 100.0,
        metrics.strategy.max_drawdown_duration,
        metrics.market.sharpe_ratio,
        metrics.strategy.sharpe_ratio,
    )
}

pub fn closing_notes() -> &'static str {
    "=== ANALYSIS COMPLETE ===\n\
     The MACD indicator helps identify trend changes and momentum shifts.\n\
     Key Points:\n\
     \u{2022} Buy when MACD line crosses ABOVE signal line\n\
     \u{2022} Sell when MACD line crosses BELOW signal line\n\
     \u{2022} Histogram shows the strength of the trend\n\
     \u{2022} This is a basic strategy - real trading requires more sophisticated risk management!\n"
}
