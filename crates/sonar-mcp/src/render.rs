//! Plain-text rendering of query results for tool responses.

use sonar_core::{
    BranchList, ComponentTree, CoverageSummary, Issue, MetricsReport, ProjectStatusReport,
    PullRequestList,
};

const SEPARATOR: &str = "\n---\n";

/// `2024-01-15T10:30:00+0000` -> `2024-01-15`
fn date_part(ts: &str) -> &str {
    ts.get(..10).unwrap_or(ts)
}

fn line_or_na(issue: &Issue) -> String {
    issue
        .line
        .map(|l| l.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn severity_or_na(issue: &Issue) -> &'static str {
    issue.severity.map(|s| s.as_str()).unwrap_or("N/A")
}

fn context_suffix(context: Option<&str>) -> String {
    context.map(|c| format!(" ({c})")).unwrap_or_default()
}

/// Full listing used by `get_issues`.
pub fn issues(list: &[Issue], context: Option<&str>) -> String {
    let body = list
        .iter()
        .map(|issue| {
            format!(
                "**{}** - {}\nRule: {}\nComponent: {}\nLine: {}\nMessage: {}\nStatus: {}\nCreated: {}\n",
                severity_or_na(issue),
                issue.issue_type,
                issue.rule,
                issue.component,
                line_or_na(issue),
                issue.message,
                issue.status,
                date_part(&issue.creation_date),
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!(
        "Found {} issues{}:\n\n{body}",
        list.len(),
        context_suffix(context)
    )
}

/// Compact listing used by the per-type tools; `noun` is e.g. "bugs".
pub fn typed_issues(noun: &str, list: &[Issue], context: Option<&str>) -> String {
    let body = list
        .iter()
        .map(|issue| {
            format!(
                "**{}** - {}:{}\nRule: {}\nMessage: {}\nStatus: {}\n",
                severity_or_na(issue),
                issue.component,
                line_or_na(issue),
                issue.rule,
                issue.message,
                issue.status,
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!(
        "Found {} {noun}{}:\n\n{body}",
        list.len(),
        context_suffix(context)
    )
}

pub fn coverage(summary: &CoverageSummary, context: Option<&str>) -> String {
    format!(
        "Coverage Report for {}{}:\n\n\
         Overall Coverage: {:.2}%\n\
         Line Coverage: {:.2}%\n\
         Branch Coverage: {:.2}%\n\
         Uncovered Lines: {}\n\
         Uncovered Conditions: {}",
        summary.component,
        context_suffix(context),
        summary.coverage,
        summary.line_coverage,
        summary.branch_coverage,
        summary.uncovered_lines,
        summary.uncovered_conditions,
    )
}

pub fn metrics(report: &MetricsReport) -> String {
    let body = if report.measures.is_empty() {
        "No metrics available".to_string()
    } else {
        report
            .measures
            .iter()
            .map(|m| match m.periods.first() {
                Some(p) => format!("**{}**: {} (Period: {})", m.metric, m.value, p.value),
                None => format!("**{}**: {}", m.metric, m.value),
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("Metrics for {}:\n\n{body}", report.component.key)
}

pub fn project_status(report: &ProjectStatusReport) -> String {
    let status = &report.project_status;
    let conditions = if status.conditions.is_empty() {
        "No conditions".to_string()
    } else {
        status
            .conditions
            .iter()
            .map(|c| {
                format!(
                    "- {}: {} ({})",
                    c.metric_key,
                    c.actual_value.as_deref().unwrap_or("N/A"),
                    c.status
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        "Project Status:\n\nQuality Gate: {}\nConditions:\n{conditions}",
        status.status
    )
}

pub fn components(tree: &ComponentTree) -> String {
    let body = tree
        .components
        .iter()
        .map(|c| {
            format!(
                "**{}** ({})\nKey: {}\nPath: {}\n",
                c.name,
                c.qualifier,
                c.key,
                c.path.as_deref().unwrap_or("N/A")
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!(
        "Project Components ({} files):\n\n{body}",
        tree.components.len()
    )
}

pub fn branches(list: &BranchList) -> String {
    if list.branches.is_empty() {
        return "Available Branches:\n\nNo branches found".to_string();
    }
    let body = list
        .branches
        .iter()
        .map(|b| {
            format!(
                "**{}** ({})\nStatus: {}\nMain: {}\nLast Analysis: {}\n",
                b.name,
                b.branch_type,
                b.status
                    .as_ref()
                    .and_then(|s| s.quality_gate_status.as_deref())
                    .unwrap_or("N/A"),
                if b.is_main { "Yes" } else { "No" },
                b.analysis_date.as_deref().map(date_part).unwrap_or("Never"),
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!("Available Branches:\n\n{body}")
}

pub fn pull_requests(list: &PullRequestList) -> String {
    if list.pull_requests.is_empty() {
        return "Available Pull Requests:\n\nNo pull requests found".to_string();
    }
    let body = list
        .pull_requests
        .iter()
        .map(|pr| {
            format!(
                "**PR #{}** - {}\nBranch: {}\nBase: {}\nStatus: {}\nLast Analysis: {}\n",
                pr.key,
                pr.title,
                pr.branch,
                pr.base,
                pr.status
                    .as_ref()
                    .and_then(|s| s.quality_gate_status.as_deref())
                    .unwrap_or("N/A"),
                pr.analysis_date.as_deref().map(date_part).unwrap_or("Never"),
            )
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!("Available Pull Requests:\n\n{body}")
}
