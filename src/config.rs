// src/config.rs
use crate::error::{EngineError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variables with this prefix override file and default values,
/// e.g. `FORECAST_ENGINE__FORECAST__MIN_BARS=40`.
pub const ENV_PREFIX: &str = "FORECAST_ENGINE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorConfig,
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    pub std_dev_multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParabolicSarConfig {
    pub initial_step: f64,
    pub max_step: f64,
}

impl Default for ParabolicSarConfig {
    fn default() -> Self {
        Self {
            initial_step: 0.02,
            max_step: 0.2,
        }
    }
}

/// Periods and multipliers for the indicator battery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub rsi_period: usize,
    pub macd: MacdConfig,
    pub bollinger: BollingerConfig,
    pub adx_period: usize,
    pub parabolic_sar: ParabolicSarConfig,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_periods: vec![20, 50],
            ema_periods: vec![12, 26],
            rsi_period: 14,
            macd: MacdConfig::default(),
            bollinger: BollingerConfig::default(),
            adx_period: 14,
            parabolic_sar: ParabolicSarConfig::default(),
        }
    }
}

/// Forecast pipeline parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Fewer bars than this is an `InsufficientData` error
    pub min_bars: usize,
    /// Trailing closes per back-fit regression
    pub training_window: usize,
    /// Trailing close-to-close differences per autoregressive step
    pub difference_window: usize,
    /// Steps in the longer forward run; its last value is the week-ahead price
    pub horizon_days: usize,
    pub trend_lookback: usize,
    pub trend_threshold_pct: f64,
    pub support_quantile: f64,
    pub resistance_quantile: f64,
    /// Reference error is `(error_scale * last_close)^2`
    pub error_scale: f64,
    pub min_confidence_samples: usize,
    pub fallback_confidence: f64,
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            min_bars: 30,
            training_window: 20,
            difference_window: 5,
            horizon_days: 7,
            trend_lookback: 10,
            trend_threshold_pct: 3.0,
            support_quantile: 0.25,
            resistance_quantile: 0.75,
            error_scale: 0.2,
            min_confidence_samples: 10,
            fallback_confidence: 0.5,
            sma_period: 20,
            ema_period: 12,
            rsi_period: 14,
        }
    }
}

impl EngineConfig {
    /// Defaults, then the optional file, then `FORECAST_ENGINE__*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Loading engine configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let cfg: EngineConfig = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;
        self.forecast.validate()
    }
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig(msg.into())
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sma_periods.contains(&0) || self.ema_periods.contains(&0) {
            return Err(invalid("moving average periods must be greater than 0"));
        }
        if self.rsi_period == 0 || self.adx_period == 0 || self.bollinger.period == 0 {
            return Err(invalid("indicator periods must be greater than 0"));
        }
        if self.macd.fast_period == 0 || self.macd.signal_period == 0 {
            return Err(invalid("MACD periods must be greater than 0"));
        }
        if self.macd.fast_period >= self.macd.slow_period {
            return Err(invalid("MACD fast period must be less than slow period"));
        }
        let multiplier = self.bollinger.std_dev_multiplier;
        if multiplier.is_nan() || multiplier < 0.0 {
            return Err(invalid("Bollinger multiplier must be non-negative"));
        }
        let sar = &self.parabolic_sar;
        if sar.initial_step.is_nan()
            || sar.initial_step <= 0.0
            || sar.max_step.is_nan()
            || sar.max_step < sar.initial_step
        {
            return Err(invalid(
                "parabolic SAR needs 0 < initial_step <= max_step",
            ));
        }
        Ok(())
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.training_window == 0 || self.difference_window == 0 || self.horizon_days == 0 {
            return Err(invalid("forecast windows must be greater than 0"));
        }
        if self.trend_lookback == 0 {
            return Err(invalid("trend_lookback must be greater than 0"));
        }
        let required = self
            .training_window
            .max(self.difference_window + 1)
            .max(self.trend_lookback + 1);
        if self.min_bars < required {
            return Err(invalid(format!(
                "min_bars {} is below the {} bars the forecast windows need",
                self.min_bars, required
            )));
        }
        for q in [self.support_quantile, self.resistance_quantile] {
            if !(0.0..=1.0).contains(&q) {
                return Err(invalid("quantiles must lie in [0, 1]"));
            }
        }
        if self.support_quantile > self.resistance_quantile {
            return Err(invalid("support quantile must not exceed resistance quantile"));
        }
        if self.error_scale.is_nan() || self.error_scale <= 0.0 {
            return Err(invalid("error_scale must be positive"));
        }
        if !(0.0..=1.0).contains(&self.fallback_confidence) {
            return Err(invalid("fallback_confidence must lie in [0, 1]"));
        }
        Ok(())
    }
}
