// Technical indicators and statistical price forecasts over daily bars.
// Both engines are pure functions of their input and safe to call from
// many threads at once.
pub mod cli;
pub mod config;
pub mod error;
pub mod forecast;
pub mod indicators;
pub mod models;
pub mod processor;
pub mod utils;

pub use config::{EngineConfig, ForecastConfig, IndicatorConfig};
pub use error::EngineError;
pub use forecast::{predict, ForecastResult, Trend};
pub use indicators::{compute_indicators, IndicatorSeries};
pub use models::{PriceBar, PriceSeries, Series};
