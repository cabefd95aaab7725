pub mod calculator;
pub mod oscillators;
pub mod overlaps;
pub mod ta;
pub mod trend;
pub mod volatility;

pub use self::calculator::{compute_indicators, IndicatorSeries};
pub use self::oscillators::MacdSeries;
pub use self::overlaps::{BollingerSeries, SarOutput};
pub use self::trend::AdxSeries;
