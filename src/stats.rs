//! Summary statistics over the collected prices.

use serde::Serialize;
use std::fmt;

/// Mean and sample standard deviation of a price list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceStats {
    pub mean: f64,
    pub stddev: f64,
}

impl PriceStats {
    /// Computes statistics over a non-empty price list.
    ///
    /// The standard deviation uses the sample (n-1) divisor; a single
    /// price has a standard deviation of zero. An empty list yields
    /// all-zero stats rather than NaN.
    pub fn from_prices(prices: &[u64]) -> Self {
        if prices.is_empty() {
            return Self { mean: 0.0, stddev: 0.0 };
        }

        let mean = prices.iter().map(|&p| p as f64).sum::<f64>() / prices.len() as f64;
        let stddev = sample_stddev(prices, mean);

        Self { mean, stddev }
    }
}

fn sample_stddev(prices: &[u64], mean: f64) -> f64 {
    if prices.len() < 2 {
        return 0.0;
    }

    let sum_squares: f64 = prices.iter().map(|&p| (p as f64 - mean).powi(2)).sum();
    (sum_squares / (prices.len() - 1) as f64).sqrt()
}

impl fmt::Display for PriceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mean = {:.0}, stddev = {:.0}", self.mean, self.stddev)
    }
}
