//! Rolling-window indicator primitives.

/// Simple Moving Average (SMA).
///
/// Arithmetic mean of the last N values, computed with a sliding sum.
/// Output index `k` corresponds to input index `k + period - 1`.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate SMA values for the given data.
    ///
    /// Returns an empty vector while fewer than `period` values exist.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    /// Get the minimum data points required.
    pub fn period(&self) -> usize {
        self.period
    }
}

/// Relative Strength Index with simple rolling means.
///
/// Average gain and average loss are plain rolling means over the
/// trailing `period` deltas, not Wilder-smoothed. When the average loss
/// over the window is zero the RSI is exactly 100; the division by zero
/// is special-cased so a non-finite value can never escape.
///
/// Output index `k` corresponds to input index `k + period`: the first
/// value needs `period` deltas, i.e. `period + 1` data points.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The conventional period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate RSI values from close prices.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for i in 1..data.len() {
            let delta = data[i] - data[i - 1];
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }

        let mean = Sma::new(self.period);
        let avg_gains = mean.calculate(&gains);
        let avg_losses = mean.calculate(&losses);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    100.0
                } else {
                    100.0 - 100.0 / (1.0 + gain / loss)
                }
            })
            .collect()
    }

    /// Get the minimum data points required.
    pub fn period(&self) -> usize {
        self.period + 1
    }
}
