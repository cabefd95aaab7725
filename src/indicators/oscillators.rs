use crate::indicators::overlaps::ema;
use crate::indicators::ta::{Next, RelativeStrengthIndex};
use crate::models::Series;
use serde::Serialize;

/// MACD line, signal and histogram, index-aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdSeries {
    pub line: Series,
    pub signal: Series,
    pub histogram: Series,
}

// Calculate RSI (Relative Strength Index)
pub fn rsi(values: &[f64], period: usize) -> Series {
    let Ok(mut rsi) = RelativeStrengthIndex::new(period) else {
        return vec![None; values.len()];
    };

    values.iter().map(|&v| rsi.next(v)).collect()
}

// Calculate MACD (Moving Average Convergence Divergence)
//
// The signal EMA runs over the defined part of the MACD line only and is
// then shifted back so it lines up with the closes again.
pub fn macd(values: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdSeries {
    let fast = ema(values, fast_period);
    let slow = ema(values, slow_period);

    let line: Series = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let mut signal = vec![None; values.len()];
    if let Some(first) = line.iter().position(Option::is_some) {
        let compact: Vec<f64> = line.iter().flatten().copied().collect();
        for (offset, value) in ema(&compact, signal_period).into_iter().enumerate() {
            signal[first + offset] = value;
        }
    }

    let histogram = line
        .iter()
        .zip(signal.iter())
        .map(|(l, s)| match (l, s) {
            (Some(l), Some(s)) => Some(l - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
