pub mod job;
pub mod worker;

pub use self::job::{AnalysisJob, AnalysisKind};
pub use self::worker::{run_batch, run_job, AnalysisReport};
