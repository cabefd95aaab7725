mod common;

use common::bars_from_closes;
use market_forecast_engine::forecast::metrics::{confidence_score, quantile_level};
use market_forecast_engine::indicators::oscillators::rsi;
use market_forecast_engine::indicators::overlaps::{bollinger_bands, ema, parabolic_sar, sma};
use market_forecast_engine::indicators::trend::adx;
use market_forecast_engine::{compute_indicators, predict, ForecastConfig, IndicatorConfig};
use proptest::prelude::*;

fn prices(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(1.0f64..1_000.0, min_len..max_len)
}

proptest! {
    #[test]
    fn sma_shorter_than_period_is_all_undefined(values in prices(0, 20), extra in 1usize..10) {
        let period = values.len() + extra;
        let out = sma(&values, period);
        prop_assert_eq!(out.len(), values.len());
        prop_assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn sma_matches_recomputed_mean(values in prices(1, 120), period in 1usize..30) {
        let out = sma(&values, period);
        for (i, value) in out.iter().enumerate() {
            if i + 1 < period {
                prop_assert!(value.is_none());
            } else {
                let window = &values[i + 1 - period..=i];
                let mean = window.iter().sum::<f64>() / period as f64;
                prop_assert!((value.unwrap() - mean).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn ema_follows_recurrence(values in prices(1, 120), period in 1usize..30) {
        let out = ema(&values, period);
        let k = 2.0 / (period as f64 + 1.0);
        for i in 0..values.len() {
            if i + 1 < period {
                prop_assert!(out[i].is_none());
            } else if i + 1 == period {
                let seed = values[..period].iter().sum::<f64>() / period as f64;
                prop_assert!((out[i].unwrap() - seed).abs() < 1e-9);
            } else {
                let expected = values[i] * k + out[i - 1].unwrap() * (1.0 - k);
                prop_assert!((out[i].unwrap() - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn rsi_is_bounded(values in prices(2, 150), period in 1usize..20) {
        for value in rsi(&values, period).into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn bollinger_bands_are_ordered(values in prices(1, 120), period in 1usize..30, mult in 0.0f64..4.0) {
        let bands = bollinger_bands(&values, period, mult);
        for i in 0..values.len() {
            match bands.middle[i] {
                Some(mid) => {
                    let upper = bands.upper[i].unwrap();
                    let lower = bands.lower[i].unwrap();
                    prop_assert!(upper >= mid && mid >= lower);
                }
                None => {
                    prop_assert!(bands.upper[i].is_none() && bands.lower[i].is_none());
                }
            }
        }
    }

    #[test]
    fn flat_series_never_breaks_rsi_or_adx(price in 1.0f64..500.0, len in 1usize..80, period in 1usize..20) {
        let flat = vec![price; len];
        for value in rsi(&flat, period).into_iter().flatten() {
            prop_assert!(value.is_finite());
        }
        for value in adx(&flat, &flat, &flat, period).adx.into_iter().flatten() {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn rising_series_never_flips_sar(start in 10.0f64..500.0, step in 0.1f64..5.0, len in 2usize..120) {
        let close: Vec<f64> = (0..len).map(|i| start + step * i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + step / 4.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - step / 4.0).collect();

        let out = parabolic_sar(&high, &low, &close, 0.02, 0.2);
        prop_assert!(out.sar[0].is_none());
        prop_assert!(out.reversals.iter().all(|r| !r));
        prop_assert!(out.sar[1].unwrap() <= low[0]);
        for i in 2..len {
            prop_assert!(out.sar[i].unwrap() <= low[i - 1].min(low[i - 2]));
        }
    }

    #[test]
    fn battery_is_aligned_for_any_length(values in prices(1, 90)) {
        let bars = bars_from_closes(&values);
        let series = compute_indicators(&bars, &IndicatorConfig::default()).unwrap();
        for name in series.names() {
            prop_assert_eq!(series.get(&name).unwrap().len(), values.len());
        }
    }

    #[test]
    fn forecast_invariants(values in prices(30, 120)) {
        let bars = bars_from_closes(&values);
        let result = predict(&bars, &ForecastConfig::default()).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!(result.support_level <= result.resistance_level);
        prop_assert_eq!(result.predicted.len(), values.len());
    }

    #[test]
    fn confidence_is_bounded(actual in prices(0, 60), noise in proptest::collection::vec(-50.0f64..50.0, 60)) {
        let predicted: Vec<Option<f64>> = actual
            .iter()
            .zip(noise.iter())
            .map(|(a, n)| Some(a + n))
            .collect();
        let score = confidence_score(&actual, &predicted, 0.2, 10, 0.5);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn support_never_exceeds_resistance(values in prices(2, 100)) {
        let support = quantile_level(&values, 0.25).unwrap();
        let resistance = quantile_level(&values, 0.75).unwrap();
        prop_assert!(support <= resistance);
    }
}
