//! Exponential moving average.
//!
//! alpha = 2/(span+1). The adjusted form divides the weighted sum by the
//! sum of weights, so the first value is x[0] and the bias from the short
//! history fades as the window fills:
//!
//!   ema[i] = sum_k (1-alpha)^k x[i-k] / sum_k (1-alpha)^k
//!
//! The recursive form seeds with x[0] and then applies
//! ema[i] = alpha*x[i] + (1-alpha)*ema[i-1].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmaWeighting {
    #[default]
    Adjusted,
    Recursive,
}

pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span.max(1) as f64 + 1.0)
}

pub fn ewm_mean(values: &[f64], span: usize, weighting: EmaWeighting) -> Vec<f64> {
    let alpha = smoothing_factor(span);
    let decay = 1.0 - alpha;
    let mut out = Vec::with_capacity(values.len());

    match weighting {
        EmaWeighting::Adjusted => {
            let mut numerator = 0.0;
            let mut denominator = 0.0;
            for &x in values {
                numerator = x + decay * numerator;
                denominator = 1.0 + decay * denominator;
                out.push(numerator / denominator);
            }
        }
        EmaWeighting::Recursive => {
            let mut ema = None;
            for &x in values {
                let next = match ema {
                    None => x,
                    Some(prev) => alpha * x + decay * prev,
                };
                ema = Some(next);
                out.push(next);
            }
        }
    }

    out
}
