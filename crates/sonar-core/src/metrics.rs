use serde::Serialize;

use crate::types::MetricsReport;

/// Metric keys requested when the caller names none.
pub const DEFAULT_METRIC_KEYS: [&str; 13] = [
    "coverage",
    "line_coverage",
    "branch_coverage",
    "uncovered_lines",
    "uncovered_conditions",
    "ncloc",
    "complexity",
    "cognitive_complexity",
    "duplicated_lines_density",
    "sqale_index",
    "reliability_rating",
    "security_rating",
    "sqale_rating",
];

pub mod key {
    pub const COVERAGE: &str = "coverage";
    pub const LINE_COVERAGE: &str = "line_coverage";
    pub const BRANCH_COVERAGE: &str = "branch_coverage";
    pub const UNCOVERED_LINES: &str = "uncovered_lines";
    pub const UNCOVERED_CONDITIONS: &str = "uncovered_conditions";
}

/// Metric keys backing a [`CoverageSummary`].
pub const COVERAGE_METRIC_KEYS: [&str; 5] = [
    key::COVERAGE,
    key::LINE_COVERAGE,
    key::BRANCH_COVERAGE,
    key::UNCOVERED_LINES,
    key::UNCOVERED_CONDITIONS,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub component: String,
    pub coverage: f64,
    pub line_coverage: f64,
    pub branch_coverage: f64,
    pub uncovered_lines: f64,
    pub uncovered_conditions: f64,
}

impl CoverageSummary {
    /// Derive coverage figures from a report. Absent metrics count as 0.
    pub fn from_report(report: &MetricsReport) -> Self {
        CoverageSummary {
            component: report.component.key.clone(),
            coverage: metric_value(report, key::COVERAGE),
            line_coverage: metric_value(report, key::LINE_COVERAGE),
            branch_coverage: metric_value(report, key::BRANCH_COVERAGE),
            uncovered_lines: metric_value(report, key::UNCOVERED_LINES),
            uncovered_conditions: metric_value(report, key::UNCOVERED_CONDITIONS),
        }
    }
}

fn metric_value(report: &MetricsReport, metric: &str) -> f64 {
    let Some(measure) = report.measure(metric) else {
        return 0.0;
    };
    match measure.value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::warn!(
                metric,
                value = %measure.value,
                "non-numeric metric value, using 0"
            );
            0.0
        }
    }
}
