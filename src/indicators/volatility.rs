use crate::models::Series;

/// Per-bar directional movement inputs for ADX. Position 0 has no prior bar
/// and carries zeros; it is never fed to the smoothers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionalMovement {
    pub true_range: Vec<f64>,
    pub plus_dm: Vec<f64>,
    pub minus_dm: Vec<f64>,
}

// Calculate True Range
// TR = max(high - low, |high - prev_close|, |low - prev_close|)
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let range1 = high - low;
    let range2 = (high - prev_close).abs();
    let range3 = (low - prev_close).abs();

    range1.max(range2).max(range3)
}

// Calculate +DM / -DM and True Range for each bar against its predecessor
pub fn directional_movement(high: &[f64], low: &[f64], close: &[f64]) -> DirectionalMovement {
    let len = close.len().min(high.len()).min(low.len());
    let mut dm = DirectionalMovement {
        true_range: vec![0.0; len],
        plus_dm: vec![0.0; len],
        minus_dm: vec![0.0; len],
    };

    for i in 1..len {
        dm.true_range[i] = true_range(high[i], low[i], close[i - 1]);

        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];

        if up_move > down_move && up_move > 0.0 {
            dm.plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            dm.minus_dm[i] = down_move;
        }
    }

    dm
}

// Calculate rolling population Standard Deviation
pub fn rolling_std_dev(values: &[f64], period: usize) -> Series {
    let mut result = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return result;
    }

    for (offset, window) in values.windows(period).enumerate() {
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
        result[offset + period - 1] = Some(variance.sqrt());
    }

    result
}
