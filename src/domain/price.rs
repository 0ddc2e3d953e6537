//! Daily close price series.

use chrono::NaiveDate;

/// A daily close series: one strictly increasing date per close.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Percentage change from the previous close; 0.0 at index 0.
    pub fn pct_change(&self) -> Vec<f64> {
        let mut changes = Vec::with_capacity(self.close.len());
        for (i, &close) in self.close.iter().enumerate() {
            if i == 0 {
                changes.push(0.0);
            } else {
                changes.push(close / self.close[i - 1] - 1.0);
            }
        }
        changes
    }
}
