use crate::models::PriceBar;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which engines a job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Indicators,
    Forecast,
    Full,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Indicators => write!(f, "indicators"),
            AnalysisKind::Forecast => write!(f, "forecast"),
            AnalysisKind::Full => write!(f, "full"),
        }
    }
}

impl From<&str> for AnalysisKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "indicators" => AnalysisKind::Indicators,
            "forecast" => AnalysisKind::Forecast,
            _ => AnalysisKind::Full, // Default
        }
    }
}

impl AnalysisKind {
    pub fn wants_indicators(self) -> bool {
        matches!(self, AnalysisKind::Indicators | AnalysisKind::Full)
    }

    pub fn wants_forecast(self) -> bool {
        matches!(self, AnalysisKind::Forecast | AnalysisKind::Full)
    }
}

/// One watch-listed symbol and its bar history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJob {
    pub symbol: String,
    pub kind: AnalysisKind,
    pub bars: Vec<PriceBar>,
}

impl AnalysisJob {
    pub fn new(symbol: String, kind: AnalysisKind, bars: Vec<PriceBar>) -> Self {
        Self { symbol, kind, bars }
    }

    pub fn label(&self) -> String {
        format!("job:{}:{}:{}", self.symbol, self.kind, self.bars.len())
    }
}
