pub mod metrics;
pub mod predictor;
pub mod regression;

pub use self::metrics::Trend;
pub use self::predictor::{predict, ForecastResult, MomentumSnapshot};
pub use self::regression::LinearFit;
