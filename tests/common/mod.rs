#![allow(dead_code)]

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use market_forecast_engine::PriceBar;

/// Consecutive weekdays starting at (or after) `start`.
pub fn trading_days(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(count);
    let mut day = start;
    while days.len() < count {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day += Duration::days(1);
    }
    days
}

/// Bars with the given closes, a one-unit range around each close.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    trading_days(start, closes.len())
        .into_iter()
        .zip(closes)
        .map(|(date, &close)| PriceBar::new(date, close, close + 0.5, close - 0.5, close, 1_000_000))
        .collect()
}

/// `count` closes starting at `start`, rising by `step` per bar.
pub fn linear_closes(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

pub fn wave_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.35).sin() * 6.0 + (i as f64 * 0.05))
        .collect()
}
