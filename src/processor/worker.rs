use crate::config::EngineConfig;
use crate::forecast::{predict, ForecastResult};
use crate::indicators::{compute_indicators, IndicatorSeries};
use crate::models::validate_bars;
use crate::processor::job::AnalysisJob;
use crate::utils::measure_time;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Outcome for one symbol. A failed engine leaves its field empty and adds
/// a message to `errors`; the other engine still runs.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators: Option<IndicatorSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl AnalysisReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Analyse one job: validate its bars, then run the requested engines.
pub fn run_job(job: &AnalysisJob, cfg: &EngineConfig) -> AnalysisReport {
    let mut report = AnalysisReport {
        symbol: job.symbol.clone(),
        indicators: None,
        forecast: None,
        errors: Vec::new(),
    };

    if let Err(e) = validate_bars(&job.bars) {
        warn!("Rejecting {}: {}", job.label(), e);
        report.errors.push(e.to_string());
        return report;
    }

    if job.kind.wants_indicators() {
        match compute_indicators(&job.bars, &cfg.indicators) {
            Ok(series) => report.indicators = Some(series),
            Err(e) => {
                warn!("Indicators failed for {}: {}", job.label(), e);
                report.errors.push(e.to_string());
            }
        }
    }

    if job.kind.wants_forecast() {
        match predict(&job.bars, &cfg.forecast) {
            Ok(forecast) => report.forecast = Some(forecast),
            Err(e) => {
                warn!("Forecast failed for {}: {}", job.label(), e);
                report.errors.push(e.to_string());
            }
        }
    }

    report
}

/// Run every job in parallel. Reports come back in job order.
#[instrument(skip_all, fields(jobs = jobs.len()))]
pub fn run_batch(jobs: &[AnalysisJob], cfg: &EngineConfig) -> Vec<AnalysisReport> {
    info!("Starting analysis of {} symbols", jobs.len());

    let reports: Vec<AnalysisReport> = measure_time("watchlist batch", || {
        jobs.par_iter().map(|job| run_job(job, cfg)).collect()
    });

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    info!(
        "Finished analysis: {} ok, {} with errors",
        reports.len() - failed,
        failed
    );

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceBar;
    use crate::processor::job::AnalysisKind;
    use chrono::{Duration, NaiveDate};

    fn bars(len: usize) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        (0..len)
            .map(|i| {
                let c = 20.0 + i as f64 * 0.25;
                PriceBar::new(start + Duration::days(i as i64), c, c + 0.5, c - 0.5, c, 1_000)
            })
            .collect()
    }

    #[test]
    fn batch_preserves_job_order() {
        let jobs: Vec<AnalysisJob> = ["MSFT", "AAPL", "NVDA"]
            .iter()
            .map(|s| AnalysisJob::new(s.to_string(), AnalysisKind::Full, bars(40)))
            .collect();

        let reports = run_batch(&jobs, &EngineConfig::default());
        let symbols: Vec<&str> = reports.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL", "NVDA"]);
        assert!(reports.iter().all(|r| r.is_ok()));
        assert!(reports.iter().all(|r| r.forecast.is_some() && r.indicators.is_some()));
    }

    #[test]
    fn short_history_keeps_indicators_and_reports_forecast_error() {
        let job = AnalysisJob::new("TSLA".into(), AnalysisKind::Full, bars(12));
        let report = run_job(&job, &EngineConfig::default());
        assert!(report.indicators.is_some());
        assert!(report.forecast.is_none());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Insufficient data"));
    }

    #[test]
    fn invalid_bars_skip_both_engines() {
        let mut input = bars(40);
        input.swap(3, 4);
        let job = AnalysisJob::new("AMD".into(), AnalysisKind::Full, input);
        let report = run_job(&job, &EngineConfig::default());
        assert!(report.indicators.is_none());
        assert!(report.forecast.is_none());
        assert!(!report.is_ok());
    }

    #[test]
    fn kind_limits_work() {
        let job = AnalysisJob::new("IBM".into(), AnalysisKind::Indicators, bars(40));
        let report = run_job(&job, &EngineConfig::default());
        assert!(report.indicators.is_some());
        assert!(report.forecast.is_none());
        assert!(report.is_ok());
    }
}
