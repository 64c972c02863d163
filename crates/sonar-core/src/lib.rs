pub mod error;
pub mod metrics;
pub mod selector;
pub mod types;

pub use error::{ErrorKind, SonarError, SonarResult};
pub use metrics::{CoverageSummary, COVERAGE_METRIC_KEYS, DEFAULT_METRIC_KEYS};
pub use selector::{resolve, select, BranchSelector};
pub use types::*;
