use crate::indicators::ta::{ExponentialMovingAverage, Next, ParabolicSar};
use crate::indicators::volatility::rolling_std_dev;
use crate::models::Series;
use serde::Serialize;

/// Bollinger Bands, index-aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BollingerSeries {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
}

/// Parabolic SAR values plus a per-bar flag marking trend reversals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SarOutput {
    pub sar: Series,
    pub reversals: Vec<bool>,
}

// Calculate SMA (Simple Moving Average)
pub fn sma(values: &[f64], period: usize) -> Series {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    // Each window is summed from scratch; a running sum drifts on long inputs.
    for (offset, window) in values.windows(period).enumerate() {
        result[offset + period - 1] = Some(window.iter().sum::<f64>() / period as f64);
    }

    result
}

// Calculate EMA (Exponential Moving Average)
pub fn ema(values: &[f64], period: usize) -> Series {
    let Ok(mut ema) = ExponentialMovingAverage::new(period) else {
        return vec![None; values.len()];
    };

    values.iter().map(|&v| ema.next(v)).collect()
}

// Calculate Bollinger Bands
pub fn bollinger_bands(values: &[f64], period: usize, std_dev_multiplier: f64) -> BollingerSeries {
    let middle = sma(values, period);
    let deviation = rolling_std_dev(values, period);

    let mut upper = Vec::with_capacity(values.len());
    let mut lower = Vec::with_capacity(values.len());

    for (mid, dev) in middle.iter().zip(deviation.iter()) {
        match (mid, dev) {
            (Some(mid), Some(dev)) => {
                let half_width = std_dev_multiplier * dev;
                upper.push(Some(mid + half_width));
                lower.push(Some(mid - half_width));
            }
            _ => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}

// Calculate Parabolic SAR
//
// The starting direction follows the first close-to-close change; a flat
// first change counts as an uptrend. Position 0 is always undefined.
pub fn parabolic_sar(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    initial_step: f64,
    max_step: f64,
) -> SarOutput {
    let len = close.len().min(high.len()).min(low.len());
    let mut sar = vec![None; len];
    let mut reversals = vec![false; len];

    if len < 2 {
        return SarOutput { sar, reversals };
    }

    let uptrend = close[1] >= close[0];
    let mut psar = ParabolicSar::new(initial_step, max_step, high[0], low[0], uptrend);

    for i in 1..len {
        let step = psar.next((high[i], low[i]));
        sar[i] = Some(step.sar);
        reversals[i] = step.reversed;
    }

    SarOutput { sar, reversals }
}
