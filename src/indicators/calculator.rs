use crate::config::IndicatorConfig;
use crate::error::{EngineError, Result};
use crate::indicators::oscillators::{self, MacdSeries};
use crate::indicators::overlaps::{self, BollingerSeries, SarOutput};
use crate::indicators::trend::{self, AdxSeries};
use crate::models::{PriceBar, PriceSeries, Series};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// The full indicator battery for one bar sequence. Every line has exactly
/// one entry per input bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub dates: Vec<NaiveDate>,
    /// Keyed by period
    pub sma: BTreeMap<usize, Series>,
    /// Keyed by period
    pub ema: BTreeMap<usize, Series>,
    pub rsi: Series,
    pub macd: MacdSeries,
    pub bollinger: BollingerSeries,
    pub adx: AdxSeries,
    pub parabolic_sar: SarOutput,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Look a line up by name: `sma_<period>`, `ema_<period>`, `rsi`, `macd`,
    /// `macd_signal`, `macd_histogram`, `bb_upper`, `bb_middle`, `bb_lower`,
    /// `adx`, `plus_di`, `minus_di`, `parabolic_sar`.
    pub fn get(&self, name: &str) -> Option<&Series> {
        match name {
            "rsi" => Some(&self.rsi),
            "macd" => Some(&self.macd.line),
            "macd_signal" => Some(&self.macd.signal),
            "macd_histogram" => Some(&self.macd.histogram),
            "bb_upper" => Some(&self.bollinger.upper),
            "bb_middle" => Some(&self.bollinger.middle),
            "bb_lower" => Some(&self.bollinger.lower),
            "adx" => Some(&self.adx.adx),
            "plus_di" => Some(&self.adx.plus_di),
            "minus_di" => Some(&self.adx.minus_di),
            "parabolic_sar" => Some(&self.parabolic_sar.sar),
            _ => {
                let (kind, period) = name.split_once('_')?;
                let period: usize = period.parse().ok()?;
                match kind {
                    "sma" => self.sma.get(&period),
                    "ema" => self.ema.get(&period),
                    _ => None,
                }
            }
        }
    }

    /// Every name accepted by [`IndicatorSeries::get`] for this result.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sma
            .keys()
            .map(|p| format!("sma_{}", p))
            .chain(self.ema.keys().map(|p| format!("ema_{}", p)))
            .collect();

        names.extend(
            [
                "rsi",
                "macd",
                "macd_signal",
                "macd_histogram",
                "bb_upper",
                "bb_middle",
                "bb_lower",
                "adx",
                "plus_di",
                "minus_di",
                "parabolic_sar",
            ]
            .into_iter()
            .map(String::from),
        );

        names
    }
}

/// Compute every configured indicator over `bars`.
///
/// Only an empty input is an error. Periods longer than the history just
/// leave that line all `None`.
#[instrument(skip_all, fields(bars = bars.len()))]
pub fn compute_indicators(bars: &[PriceBar], cfg: &IndicatorConfig) -> Result<IndicatorSeries> {
    if bars.is_empty() {
        return Err(EngineError::EmptySeries);
    }

    let data = PriceSeries::from(bars);
    let close = &data.close;

    let longest = cfg
        .sma_periods
        .iter()
        .chain(cfg.ema_periods.iter())
        .copied()
        .chain([cfg.macd.slow_period, cfg.bollinger.period, 2 * cfg.adx_period])
        .max()
        .unwrap_or(0);
    if data.len() < longest {
        debug!(
            "History of {} bars is shorter than the longest warm-up ({}); some lines stay undefined",
            data.len(),
            longest
        );
    }

    let sma = cfg
        .sma_periods
        .iter()
        .map(|&p| (p, overlaps::sma(close, p)))
        .collect();
    let ema = cfg
        .ema_periods
        .iter()
        .map(|&p| (p, overlaps::ema(close, p)))
        .collect();

    let series = IndicatorSeries {
        sma,
        ema,
        rsi: oscillators::rsi(close, cfg.rsi_period),
        macd: oscillators::macd(
            close,
            cfg.macd.fast_period,
            cfg.macd.slow_period,
            cfg.macd.signal_period,
        ),
        bollinger: overlaps::bollinger_bands(
            close,
            cfg.bollinger.period,
            cfg.bollinger.std_dev_multiplier,
        ),
        adx: trend::adx(&data.high, &data.low, close, cfg.adx_period),
        parabolic_sar: overlaps::parabolic_sar(
            &data.high,
            &data.low,
            close,
            cfg.parabolic_sar.initial_step,
            cfg.parabolic_sar.max_step,
        ),
        dates: data.dates,
    };

    debug!(
        "Computed {} indicator lines, {} SAR reversals",
        series.names().len(),
        series.parabolic_sar.reversals.iter().filter(|r| **r).count()
    );

    Ok(series)
}
