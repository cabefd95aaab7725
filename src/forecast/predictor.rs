use crate::config::ForecastConfig;
use crate::error::{EngineError, Result};
use crate::forecast::metrics::{classify_trend, confidence_score, quantile_level, Trend};
use crate::forecast::regression::LinearFit;
use crate::indicators::{oscillators, overlaps};
use crate::models::{PriceBar, Series};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

/// Latest values of the moving-average and RSI helpers at the last bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MomentumSnapshot {
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
}

/// Statistical short-horizon forecast for one bar sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub dates: Vec<NaiveDate>,
    pub actual: Vec<f64>,
    /// One-step-ahead back-fit, `None` over the training warm-up
    pub predicted: Series,
    pub next_day_prediction: f64,
    pub next_week_prediction: f64,
    pub confidence: f64,
    pub trend: Trend,
    pub support_level: f64,
    pub resistance_level: f64,
    /// Full forward path of the longer run; its last value is `next_week_prediction`
    pub forward: Vec<f64>,
    pub momentum: MomentumSnapshot,
}

/// Back-fit each close from index `window` on using a line through the
/// `window` closes before it.
pub fn backfit_predictions(closes: &[f64], window: usize) -> Series {
    let mut predicted = vec![None; closes.len()];

    for i in window..closes.len() {
        let fit = LinearFit::over_positions(&closes[i - window..i]);
        predicted[i] = Some(fit.next_after(window));
    }

    predicted
}

/// Extend the closes `steps` days by autoregressing on first differences.
///
/// Each step fits a line through the last `difference_window` differences,
/// takes its next value as the next difference, and adds it to the last
/// price. The predicted difference joins the history seen by later steps.
pub fn forecast_path(closes: &[f64], difference_window: usize, steps: usize) -> Vec<f64> {
    let Some(&last) = closes.last() else {
        return Vec::new();
    };

    let mut differences: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let mut price = last;
    let mut path = Vec::with_capacity(steps);

    for _ in 0..steps {
        let start = differences.len().saturating_sub(difference_window);
        let recent = &differences[start..];
        let next_difference = LinearFit::over_positions(recent).next_after(recent.len());

        differences.push(next_difference);
        price += next_difference;
        path.push(price);
    }

    path
}

/// Run the forecast pipeline over `bars`.
///
/// Fails with `InsufficientData` below `cfg.min_bars` bars.
#[instrument(skip_all, fields(bars = bars.len()))]
pub fn predict(bars: &[PriceBar], cfg: &ForecastConfig) -> Result<ForecastResult> {
    if bars.len() < cfg.min_bars || bars.is_empty() {
        return Err(EngineError::InsufficientData {
            required: cfg.min_bars.max(1),
            actual: bars.len(),
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let dates: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();

    let predicted = backfit_predictions(&closes, cfg.training_window);

    // The two runs are independent; the week-ahead value is not built on
    // top of the day-ahead one.
    let next_day_prediction = forecast_path(&closes, cfg.difference_window, 1)[0];
    let forward = forecast_path(&closes, cfg.difference_window, cfg.horizon_days);
    let next_week_prediction = forward.last().copied().unwrap_or(next_day_prediction);

    let support_level = quantile_level(&closes, cfg.support_quantile).unwrap_or_default();
    let resistance_level = quantile_level(&closes, cfg.resistance_quantile).unwrap_or_default();

    let trend = classify_trend(&closes, cfg.trend_lookback, cfg.trend_threshold_pct);

    let confidence = confidence_score(
        &closes,
        &predicted,
        cfg.error_scale,
        cfg.min_confidence_samples,
        cfg.fallback_confidence,
    );

    let momentum = MomentumSnapshot {
        sma: latest(&overlaps::sma(&closes, cfg.sma_period)),
        ema: latest(&overlaps::ema(&closes, cfg.ema_period)),
        rsi: latest(&oscillators::rsi(&closes, cfg.rsi_period)),
    };

    debug!(
        "Forecast: next day {:.4}, next week {:.4}, trend {}, confidence {:.3}",
        next_day_prediction, next_week_prediction, trend, confidence
    );

    Ok(ForecastResult {
        dates,
        actual: closes,
        predicted,
        next_day_prediction,
        next_week_prediction,
        confidence,
        trend,
        support_level,
        resistance_level,
        forward,
        momentum,
    })
}

fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}
