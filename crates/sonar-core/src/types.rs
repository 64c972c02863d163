use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Issues ──
//
// Each enum ends in an `Unknown` catch-all so one unexpected value does not
// fail the whole search response.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Minor,
    Major,
    Critical,
    Blocker,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Minor => "MINOR",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
            Severity::Blocker => "BLOCKER",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

/// Issue workflow status. Security hotspots use `TO_REVIEW` / `REVIEWED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Open,
    Confirmed,
    Reopened,
    Resolved,
    Closed,
    ToReview,
    Reviewed,
    #[serde(other)]
    Unknown,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::Confirmed => "CONFIRMED",
            IssueStatus::Reopened => "REOPENED",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Closed => "CLOSED",
            IssueStatus::ToReview => "TO_REVIEW",
            IssueStatus::Reviewed => "REVIEWED",
            IssueStatus::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    CodeSmell,
    Bug,
    Vulnerability,
    SecurityHotspot,
    #[serde(other)]
    Unknown,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::CodeSmell => "CODE_SMELL",
            IssueType::Bug => "BUG",
            IssueType::Vulnerability => "VULNERABILITY",
            IssueType::SecurityHotspot => "SECURITY_HOTSPOT",
            IssueType::Unknown => "UNKNOWN",
        }
    }

    /// Plural noun used in summaries ("code smells", "bugs", ...).
    pub fn plural(&self) -> &'static str {
        match self {
            IssueType::CodeSmell => "code smells",
            IssueType::Bug => "bugs",
            IssueType::Vulnerability => "vulnerabilities",
            IssueType::SecurityHotspot => "security hotspots",
            IssueType::Unknown => "issues",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start_line: u32,
    pub end_line: u32,
    #[serde(default)]
    pub start_offset: u32,
    #[serde(default)]
    pub end_offset: u32,
}

/// A single finding as reported by `api/issues/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub key: String,
    pub rule: String,
    /// Absent on security hotspots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub component: String,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_range: Option<TextRange>,
    pub status: IssueStatus,
    pub message: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub creation_date: String,
    pub update_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_index: u32,
    pub page_size: u32,
    pub total: u64,
}

/// Envelope of `api/issues/search`. Only the first page is ever requested.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuePage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl IssuePage {
    /// Total matching issues on the server, which may exceed `issues.len()`.
    pub fn reported_total(&self) -> u64 {
        self.paging.map(|p| p.total).unwrap_or(self.total)
    }

    pub fn is_truncated(&self) -> bool {
        self.reported_total() > self.issues.len() as u64
    }
}

// ── Measures ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qualifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPeriod {
    pub index: u32,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricMeasure {
    pub metric: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub periods: Vec<MetricPeriod>,
}

/// Normalized `api/measures/component` result. Metric keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub component: ComponentRef,
    pub measures: Vec<MetricMeasure>,
}

impl MetricsReport {
    pub fn measure(&self, metric: &str) -> Option<&MetricMeasure> {
        self.measures.iter().find(|m| m.metric == metric)
    }
}

/// Raw shape of `api/measures/component`; convert with `MetricsReport::from`.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasuresResponse {
    pub component: MeasuresComponent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeasuresComponent {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qualifier: String,
    #[serde(default)]
    pub measures: Vec<RawMeasure>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasure {
    pub metric: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub periods: Vec<RawPeriod>,
    /// Newer servers report a single new-code period under this key.
    #[serde(default)]
    pub period: Option<RawPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPeriod {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub value: Option<String>,
}

impl From<RawPeriod> for MetricPeriod {
    fn from(raw: RawPeriod) -> Self {
        MetricPeriod {
            index: raw.index.unwrap_or(1),
            value: raw.value.unwrap_or_default(),
        }
    }
}

impl From<MeasuresResponse> for MetricsReport {
    fn from(raw: MeasuresResponse) -> Self {
        let MeasuresComponent {
            key,
            name,
            qualifier,
            measures,
        } = raw.component;

        let mut seen = HashSet::new();
        let measures = measures
            .into_iter()
            .filter(|m| seen.insert(m.metric.clone()))
            .map(|m| {
                let mut periods: Vec<MetricPeriod> =
                    m.periods.into_iter().map(MetricPeriod::from).collect();
                if periods.is_empty() {
                    periods.extend(m.period.map(MetricPeriod::from));
                }
                MetricMeasure {
                    metric: m.metric,
                    value: m.value.unwrap_or_default(),
                    periods,
                }
            })
            .collect();

        MetricsReport {
            component: ComponentRef {
                key,
                name,
                qualifier,
            },
            measures,
        }
    }
}

// ── Quality gate ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusReport {
    pub project_status: QualityGateStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityGateStatus {
    /// `OK`, `WARN`, `ERROR` or `NONE`.
    pub status: String,
    #[serde(default)]
    pub conditions: Vec<GateCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateCondition {
    pub status: String,
    pub metric_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_threshold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,
}

// ── Components ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_component: Option<TreeComponent>,
    #[serde(default)]
    pub components: Vec<TreeComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeComponent {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub qualifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

// ── Branches and pull requests ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_gate_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchList {
    #[serde(default)]
    pub branches: Vec<ProjectBranch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBranch {
    pub name: String,
    /// `BRANCH` or the legacy `LONG` / `SHORT`.
    #[serde(rename = "type", default)]
    pub branch_type: String,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AnalysisStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestList {
    #[serde(default)]
    pub pull_requests: Vec<ProjectPullRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPullRequest {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub base: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AnalysisStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
