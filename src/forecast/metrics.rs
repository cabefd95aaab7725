use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction label derived from the recent percentage move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "bullish"),
            Trend::Bearish => write!(f, "bearish"),
            Trend::Neutral => write!(f, "neutral"),
        }
    }
}

/// Value at index `floor(n * quantile)` of the ascending-sorted closes,
/// clamped to the last element.
pub fn quantile_level(closes: &[f64], quantile: f64) -> Option<f64> {
    if closes.is_empty() {
        return None;
    }

    let mut sorted = closes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let index = ((sorted.len() as f64 * quantile).floor() as usize).min(sorted.len() - 1);
    Some(sorted[index])
}

/// Compare the close `lookback` bars before the last one with the last close.
///
/// Moves strictly beyond `threshold_pct` in either direction get a label;
/// anything else, including too little history, is neutral.
pub fn classify_trend(closes: &[f64], lookback: usize, threshold_pct: f64) -> Trend {
    if closes.len() <= lookback {
        return Trend::Neutral;
    }

    let last = closes[closes.len() - 1];
    let past = closes[closes.len() - 1 - lookback];
    if past == 0.0 {
        return Trend::Neutral;
    }

    let change_pct = (last - past) / past * 100.0;
    if change_pct > threshold_pct {
        Trend::Bullish
    } else if change_pct < -threshold_pct {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}

/// Heuristic accuracy score of a back-fit against the actual closes.
///
/// `1 - mse / (error_scale * last_close)^2`, clamped to `[0, 1]`. The
/// reference error is a fixed fraction of the last price, not a statistical
/// interval. With fewer than `min_samples` comparable points the score is
/// `fallback`.
pub fn confidence_score(
    actual: &[f64],
    predicted: &[Option<f64>],
    error_scale: f64,
    min_samples: usize,
    fallback: f64,
) -> f64 {
    let pairs: Vec<(f64, f64)> = actual
        .iter()
        .zip(predicted.iter())
        .filter_map(|(&a, p)| p.map(|p| (a, p)))
        .collect();

    let Some(&last_close) = actual.last() else {
        return fallback;
    };
    if pairs.len() < min_samples || pairs.is_empty() {
        return fallback;
    }

    let mse = pairs.iter().map(|(a, p)| (a - p).powi(2)).sum::<f64>() / pairs.len() as f64;
    let reference = (error_scale * last_close).powi(2);
    if reference == 0.0 {
        return fallback;
    }

    (1.0 - mse / reference).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_index_is_floored() {
        let closes: Vec<f64> = (0..40).map(|i| 139.0 - i as f64).collect();
        assert_eq!(quantile_level(&closes, 0.25), Some(110.0));
        assert_eq!(quantile_level(&closes, 0.75), Some(130.0));
        assert_eq!(quantile_level(&closes, 1.0), Some(139.0));
        assert_eq!(quantile_level(&[], 0.5), None);
    }

    #[test]
    fn trend_thresholds() {
        let mut closes = vec![100.0; 11];
        closes[10] = 102.9;
        assert_eq!(classify_trend(&closes, 10, 3.0), Trend::Neutral);
        closes[10] = 103.5;
        assert_eq!(classify_trend(&closes, 10, 3.0), Trend::Bullish);
        closes[10] = 96.0;
        assert_eq!(classify_trend(&closes, 10, 3.0), Trend::Bearish);
    }

    #[test]
    fn trend_needs_lookback_history() {
        assert_eq!(classify_trend(&[1.0, 2.0], 10, 3.0), Trend::Neutral);
    }

    #[test]
    fn perfect_backfit_is_full_confidence() {
        let actual: Vec<f64> = (0..30).map(|i| 50.0 + i as f64).collect();
        let predicted: Vec<Option<f64>> = actual.iter().map(|a| Some(*a)).collect();
        assert_eq!(confidence_score(&actual, &predicted, 0.2, 10, 0.5), 1.0);
    }

    #[test]
    fn too_few_samples_falls_back() {
        let actual = vec![10.0; 20];
        let mut predicted = vec![None; 20];
        for p in predicted.iter_mut().skip(11) {
            *p = Some(10.0);
        }
        assert_eq!(confidence_score(&actual, &predicted, 0.2, 10, 0.5), 0.5);
    }

    #[test]
    fn huge_error_clamps_to_zero() {
        let actual = vec![10.0; 12];
        let predicted = vec![Some(1_000.0); 12];
        assert_eq!(confidence_score(&actual, &predicted, 0.2, 10, 0.5), 0.0);
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Bullish).unwrap(), "\"bullish\"");
        assert_eq!(Trend::Bearish.to_string(), "bearish");
    }
}
