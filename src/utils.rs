use chrono::NaiveDate;
use std::time::Instant;
use tracing::debug;

// Run `f` and log how long it took
pub fn measure_time<F, T>(operation_name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    debug!("{} completed in {:.2?}", operation_name, elapsed);

    result
}

// Describe the date span of a bar sequence for log lines
pub fn format_span(dates: &[NaiveDate]) -> String {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => format!(
            "{} to {} ({} bars)",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d"),
            dates.len()
        ),
        _ => "no bars".to_string(),
    }
}
