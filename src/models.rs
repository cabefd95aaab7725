use crate::error::{EngineError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An index-aligned indicator line. `None` marks positions still inside the
/// indicator's warm-up window.
pub type Series = Vec<Option<f64>>;

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Column-oriented copy of a bar slice, so indicator code can work on plain
/// `&[f64]` the same way for every price field.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    pub dates: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<u64>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

impl From<&[PriceBar]> for PriceSeries {
    fn from(bars: &[PriceBar]) -> Self {
        let mut series = PriceSeries {
            dates: Vec::with_capacity(bars.len()),
            open: Vec::with_capacity(bars.len()),
            high: Vec::with_capacity(bars.len()),
            low: Vec::with_capacity(bars.len()),
            close: Vec::with_capacity(bars.len()),
            volume: Vec::with_capacity(bars.len()),
        };

        for bar in bars {
            series.dates.push(bar.date);
            series.open.push(bar.open);
            series.high.push(bar.high);
            series.low.push(bar.low);
            series.close.push(bar.close);
            series.volume.push(bar.volume);
        }

        series
    }
}

/// Check the bar-sequence contract: positive finite prices, `high >= low`,
/// and strictly ascending dates. Gaps (weekends, holidays) are fine.
pub fn validate_bars(bars: &[PriceBar]) -> Result<()> {
    for (index, bar) in bars.iter().enumerate() {
        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidBar {
                    index,
                    reason: format!("{} must be a positive finite price, got {}", field, value),
                });
            }
        }

        if bar.high < bar.low {
            return Err(EngineError::InvalidBar {
                index,
                reason: format!("high {} is below low {}", bar.high, bar.low),
            });
        }

        if index > 0 {
            let previous = bars[index - 1].date;
            if bar.date <= previous {
                return Err(EngineError::UnorderedDates {
                    index,
                    previous,
                    current: bar.date,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        PriceBar::new(date, close, close + 1.0, close - 1.0, close, 1_000)
    }

    #[test]
    fn columns_follow_bar_order() {
        let bars = vec![bar(4, 10.0), bar(5, 11.0), bar(6, 12.0)];
        let series = PriceSeries::from(bars.as_slice());
        assert_eq!(series.len(), 3);
        assert_eq!(series.close, vec![10.0, 11.0, 12.0]);
        assert_eq!(series.high, vec![11.0, 12.0, 13.0]);
        assert_eq!(series.dates[2], NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }

    #[test]
    fn accepts_gapped_ascending_dates() {
        // Friday then Monday
        let bars = vec![bar(8, 10.0), bar(11, 10.5)];
        assert!(validate_bars(&bars).is_ok());
    }

    #[test]
    fn rejects_repeated_date() {
        let bars = vec![bar(4, 10.0), bar(4, 11.0)];
        match validate_bars(&bars) {
            Err(EngineError::UnorderedDates { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected UnorderedDates, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_positive_price() {
        let mut bars = vec![bar(4, 10.0), bar(5, 11.0)];
        bars[1].low = 0.0;
        assert!(matches!(
            validate_bars(&bars),
            Err(EngineError::InvalidBar { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut bars = vec![bar(4, 10.0)];
        bars[0].high = 8.0;
        assert!(matches!(
            validate_bars(&bars),
            Err(EngineError::InvalidBar { index: 0, .. })
        ));
    }

    #[test]
    fn bar_round_trips_through_json_with_plain_date() {
        let json = r#"{"date":"2024-03-04","open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":42}"#;
        let parsed: PriceBar = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(parsed.volume, 42);
        assert!(serde_json::to_string(&parsed).unwrap().contains("\"2024-03-04\""));
    }
}
