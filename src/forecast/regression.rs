//! Ordinary least squares line fit over position indices.
//!
//! Observations are placed at x = 1, 2, ..., n, so a window of trailing
//! values can be extrapolated one step by evaluating at x = n + 1.

/// Replaces a zero denominator in the slope formula.
pub const SLOPE_EPSILON: f64 = 1e-10;

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit `values` against positions `1..=values.len()`.
    ///
    /// An empty slice fits the zero line.
    pub fn over_positions(values: &[f64]) -> Self {
        let n = values.len() as f64;
        if values.is_empty() {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let x = (i + 1) as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_xx += x * x;
        }

        let mut denominator = n * sum_xx - sum_x * sum_x;
        if denominator == 0.0 {
            denominator = SLOPE_EPSILON;
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Self { slope, intercept }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Value one position past the fitted window.
    pub fn next_after(&self, window_len: usize) -> f64 {
        self.evaluate((window_len + 1) as f64)
    }
}
