// Streaming building blocks for the series indicators.
// Each one consumes a single value per bar and reports `None` until its
// warm-up window is filled.

use crate::error::{EngineError, Result};

/// Substituted for a zero average loss so RSI stays finite.
pub const RSI_LOSS_EPSILON: f64 = 1e-10;

/// The `Next` trait is used for indicators that consume one bar at a time
pub trait Next<T> {
    type Output;
    fn next(&mut self, input: T) -> Self::Output;
}

fn check_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(EngineError::InvalidConfig(
            "Period must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Exponential Moving Average seeded with the SMA of its first `period` inputs
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    period: usize,
    alpha: f64,
    value: Option<f64>,
    index: usize,
    sum: f64,
}

impl ExponentialMovingAverage {
    pub fn new(period: usize) -> Result<Self> {
        check_period(period)?;

        Ok(Self {
            period,
            alpha: 2.0 / (period as f64 + 1.0),
            value: None,
            index: 0,
            sum: 0.0,
        })
    }
}

impl Next<f64> for ExponentialMovingAverage {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        match self.value {
            Some(prev) => {
                let ema = input * self.alpha + prev * (1.0 - self.alpha);
                self.value = Some(ema);
            }
            None => {
                self.sum += input;
                self.index += 1;
                if self.index == self.period {
                    self.value = Some(self.sum / self.period as f64);
                }
            }
        }

        self.value
    }
}

/// Wilder smoothing: simple mean over the first `period` inputs, then
/// `avg = (avg * (period - 1) + x) / period`.
#[derive(Debug, Clone)]
pub struct WilderAverage {
    period: usize,
    sum: f64,
    count: usize,
    value: Option<f64>,
}

impl WilderAverage {
    pub fn new(period: usize) -> Result<Self> {
        check_period(period)?;

        Ok(Self {
            period,
            sum: 0.0,
            count: 0,
            value: None,
        })
    }
}

impl Next<f64> for WilderAverage {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        let p = self.period as f64;
        match self.value {
            Some(avg) => self.value = Some((avg * (p - 1.0) + input) / p),
            None => {
                self.sum += input;
                self.count += 1;
                if self.count == self.period {
                    self.value = Some(self.sum / p);
                }
            }
        }

        self.value
    }
}

/// Relative Strength Index over closing prices.
///
/// The first value appears once `period` close-to-close changes have been
/// seen, i.e. on the `period + 1`-th close.
#[derive(Debug, Clone)]
pub struct RelativeStrengthIndex {
    prev_value: Option<f64>,
    avg_gain: WilderAverage,
    avg_loss: WilderAverage,
}

impl RelativeStrengthIndex {
    pub fn new(period: usize) -> Result<Self> {
        Ok(Self {
            prev_value: None,
            avg_gain: WilderAverage::new(period)?,
            avg_loss: WilderAverage::new(period)?,
        })
    }
}

impl Next<f64> for RelativeStrengthIndex {
    type Output = Option<f64>;

    fn next(&mut self, input: f64) -> Self::Output {
        let prev = self.prev_value.replace(input)?;
        let change = input - prev;

        let avg_gain = self.avg_gain.next(change.max(0.0));
        let avg_loss = self.avg_loss.next((-change).max(0.0));

        match (avg_gain, avg_loss) {
            (Some(gain), Some(loss)) => Some(rsi_from_averages(gain, loss)),
            _ => None,
        }
    }
}

/// `100 - 100 / (1 + gain / loss)` with a zero loss replaced by
/// [`RSI_LOSS_EPSILON`].
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let loss = if avg_loss == 0.0 {
        RSI_LOSS_EPSILON
    } else {
        avg_loss
    };
    100.0 - 100.0 / (1.0 + avg_gain / loss)
}

/// Trend-following state carried from bar to bar by the Parabolic SAR scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarState {
    pub uptrend: bool,
    pub sar: f64,
    pub extreme_point: f64,
    pub accel: f64,
}

/// Result of feeding one bar to [`ParabolicSar`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarStep {
    pub sar: f64,
    pub reversed: bool,
}

/// Parabolic Stop-and-Reverse tracker.
///
/// Seeded from the first bar; every subsequent `(high, low)` advances the
/// state by one step.
#[derive(Debug, Clone)]
pub struct ParabolicSar {
    initial_step: f64,
    max_step: f64,
    state: SarState,
    // [previous bar, the bar before it]
    prev_highs: [f64; 2],
    prev_lows: [f64; 2],
}

impl ParabolicSar {
    /// Seed from the first bar's range. An uptrend starts the SAR at the low
    /// and tracks highs; a downtrend does the opposite.
    pub fn new(initial_step: f64, max_step: f64, high: f64, low: f64, uptrend: bool) -> Self {
        let (sar, extreme_point) = if uptrend { (low, high) } else { (high, low) };

        Self {
            initial_step,
            max_step,
            state: SarState {
                uptrend,
                sar,
                extreme_point,
                accel: initial_step,
            },
            prev_highs: [high, high],
            prev_lows: [low, low],
        }
    }

    pub fn state(&self) -> SarState {
        self.state
    }
}

impl Next<(f64, f64)> for ParabolicSar {
    type Output = SarStep;

    fn next(&mut self, (high, low): (f64, f64)) -> Self::Output {
        let st = &mut self.state;
        let mut sar = st.sar + st.accel * (st.extreme_point - st.sar);
        let mut reversed = false;

        if st.uptrend {
            sar = sar.min(self.prev_lows[0]).min(self.prev_lows[1]);

            if low < sar {
                reversed = true;
                st.uptrend = false;
                sar = st.extreme_point;
                st.extreme_point = low;
                st.accel = self.initial_step;
            } else if high > st.extreme_point {
                st.extreme_point = high;
                st.accel = (st.accel + self.initial_step).min(self.max_step);
            }
        } else {
            sar = sar.max(self.prev_highs[0]).max(self.prev_highs[1]);

            if high > sar {
                reversed = true;
                st.uptrend = true;
                sar = st.extreme_point;
                st.extreme_point = high;
                st.accel = self.initial_step;
            } else if low < st.extreme_point {
                st.extreme_point = low;
                st.accel = (st.accel + self.initial_step).min(self.max_step);
            }
        }

        st.sar = sar;
        self.prev_highs = [high, self.prev_highs[0]];
        self.prev_lows = [low, self.prev_lows[0]];

        SarStep { sar, reversed }
    }
}
