use std::sync::Arc;

use serde::de::DeserializeOwned;
use sonar_core::{
    select, BranchList, BranchSelector, ComponentTree, CoverageSummary, Issue, IssuePage,
    IssueType, MeasuresResponse, MetricsReport, ProjectStatusReport, PullRequestList, SonarError,
    SonarResult, COVERAGE_METRIC_KEYS, DEFAULT_METRIC_KEYS,
};

use crate::config::Config;
use crate::params::QueryParams;
use crate::transport::{classify, Transport, UreqTransport};

/// Fixed page size; only the first page is ever fetched.
pub const PAGE_SIZE: u32 = 500;

/// API paths relative to `{base_url}/api`.
pub mod endpoint {
    pub const ISSUES_SEARCH: &str = "/issues/search";
    pub const MEASURES_COMPONENT: &str = "/measures/component";
    pub const QUALITY_GATE_STATUS: &str = "/qualitygates/project_status";
    pub const COMPONENTS_TREE: &str = "/components/tree";
    pub const BRANCHES_LIST: &str = "/project_branches/list";
    pub const PULL_REQUESTS_LIST: &str = "/project_pull_requests/list";
}

/// Which project and analysis context a query targets.
#[derive(Debug, Clone, Default)]
pub struct QueryScope {
    pub project_key: Option<String>,
    pub branch: Option<String>,
    pub pull_request: Option<String>,
}

impl QueryScope {
    pub fn project(key: impl Into<String>) -> Self {
        Self {
            project_key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_pull_request(mut self, pull_request: impl Into<String>) -> Self {
        self.pull_request = Some(pull_request.into());
        self
    }

    /// Branch/PR selector with pull-request precedence applied.
    pub fn selector(&self) -> BranchSelector {
        select(self.branch.as_deref(), self.pull_request.as_deref())
    }
}

/// Filters for `api/issues/search`. Empty lists are not sent.
#[derive(Debug, Clone, Default)]
pub struct IssueQuery {
    pub scope: QueryScope,
    pub types: Vec<String>,
    pub severities: Vec<String>,
    pub statuses: Vec<String>,
}

/// SonarQube Web API client.
///
/// Cheap to clone; clones share the configuration and transport. Each
/// operation issues exactly one HTTP request, never retries and never caches.
#[derive(Clone)]
pub struct QueryClient {
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl QueryClient {
    pub fn new(config: Config) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ── Parameter construction ──

    fn issue_params(&self, query: &IssueQuery) -> SonarResult<QueryParams> {
        let key = self.config.project_key(query.scope.project_key.as_deref())?;
        let mut params = QueryParams::new();
        params
            .push("componentKeys", key)
            .push("ps", PAGE_SIZE.to_string())
            .push_list("types", &query.types)
            .push_list("severities", &query.severities)
            .push_list("statuses", &query.statuses)
            .push_selector(&query.scope.selector());
        Ok(params)
    }

    fn metrics_params<S: AsRef<str>>(
        &self,
        scope: &QueryScope,
        metric_keys: &[S],
    ) -> SonarResult<QueryParams> {
        let key = self.config.project_key(scope.project_key.as_deref())?;
        let mut params = QueryParams::new();
        params.push("component", key);
        if metric_keys.iter().any(|k| !k.as_ref().trim().is_empty()) {
            params.push_list("metricKeys", metric_keys);
        } else {
            params.push_list("metricKeys", &DEFAULT_METRIC_KEYS);
        }
        params.push_selector(&scope.selector());
        Ok(params)
    }

    fn project_status_params(&self, scope: &QueryScope) -> SonarResult<QueryParams> {
        let key = self.config.project_key(scope.project_key.as_deref())?;
        let mut params = QueryParams::new();
        params
            .push("projectKey", key)
            .push_selector(&scope.selector());
        Ok(params)
    }

    fn components_params(&self, scope: &QueryScope) -> SonarResult<QueryParams> {
        let key = self.config.project_key(scope.project_key.as_deref())?;
        let mut params = QueryParams::new();
        params
            .push("component", key)
            .push("qualifiers", "FIL")
            .push("ps", PAGE_SIZE.to_string())
            .push_selector(&scope.selector());
        Ok(params)
    }

    fn listing_params(&self, project_key: Option<&str>) -> SonarResult<QueryParams> {
        let key = self.config.project_key(project_key)?;
        let mut params = QueryParams::new();
        params.push("project", key);
        Ok(params)
    }

    // ── Dispatch ──

    async fn get<T: DeserializeOwned>(
        &self,
        path: &'static str,
        params: QueryParams,
    ) -> SonarResult<T> {
        tracing::debug!(path, query = %params, "GET");
        let transport = Arc::clone(&self.transport);
        let value = tokio::task::spawn_blocking(move || transport.get(path, &params))
            .await
            .map_err(|e| SonarError::Upstream(format!("request task failed: {e}")))?
            .map_err(|failure| classify(failure, &self.config.base_url))?;

        serde_json::from_value(value)
            .map_err(|e| SonarError::Upstream(format!("unexpected response from {path}: {e}")))
    }

    // ── Operations ──

    /// First page (500) of issues matching `query`, in service order.
    pub async fn fetch_issues(&self, query: &IssueQuery) -> SonarResult<Vec<Issue>> {
        let params = self.issue_params(query)?;
        let page: IssuePage = self
            .get(endpoint::ISSUES_SEARCH, params)
            .await
            .map_err(SonarError::issue_fetch)?;

        if page.is_truncated() {
            tracing::warn!(
                returned = page.issues.len(),
                total = page.reported_total(),
                "issue list truncated to the first page"
            );
        }
        Ok(page.issues)
    }

    pub async fn fetch_by_type(
        &self,
        issue_type: IssueType,
        scope: &QueryScope,
    ) -> SonarResult<Vec<Issue>> {
        let query = IssueQuery {
            scope: scope.clone(),
            types: vec![issue_type.as_str().to_string()],
            ..IssueQuery::default()
        };
        self.fetch_issues(&query).await
    }

    pub async fn fetch_code_smells(&self, scope: &QueryScope) -> SonarResult<Vec<Issue>> {
        self.fetch_by_type(IssueType::CodeSmell, scope).await
    }

    pub async fn fetch_bugs(&self, scope: &QueryScope) -> SonarResult<Vec<Issue>> {
        self.fetch_by_type(IssueType::Bug, scope).await
    }

    pub async fn fetch_vulnerabilities(&self, scope: &QueryScope) -> SonarResult<Vec<Issue>> {
        self.fetch_by_type(IssueType::Vulnerability, scope).await
    }

    pub async fn fetch_security_hotspots(&self, scope: &QueryScope) -> SonarResult<Vec<Issue>> {
        self.fetch_by_type(IssueType::SecurityHotspot, scope).await
    }

    /// Measures for the project; an empty `metric_keys` requests the default set.
    pub async fn fetch_metrics<S: AsRef<str>>(
        &self,
        scope: &QueryScope,
        metric_keys: &[S],
    ) -> SonarResult<MetricsReport> {
        let params = self.metrics_params(scope, metric_keys)?;
        let raw: MeasuresResponse = self.get(endpoint::MEASURES_COMPONENT, params).await?;
        Ok(MetricsReport::from(raw))
    }

    /// Coverage figures; metrics the server does not report count as 0.
    pub async fn fetch_coverage(&self, scope: &QueryScope) -> SonarResult<CoverageSummary> {
        let report = self.fetch_metrics(scope, &COVERAGE_METRIC_KEYS).await?;
        Ok(CoverageSummary::from_report(&report))
    }

    pub async fn fetch_project_status(
        &self,
        scope: &QueryScope,
    ) -> SonarResult<ProjectStatusReport> {
        let params = self.project_status_params(scope)?;
        self.get(endpoint::QUALITY_GATE_STATUS, params).await
    }

    /// Files (`FIL` qualifier) of the project, first page only.
    pub async fn fetch_components(&self, scope: &QueryScope) -> SonarResult<ComponentTree> {
        let params = self.components_params(scope)?;
        self.get(endpoint::COMPONENTS_TREE, params).await
    }

    pub async fn fetch_branches(&self, project_key: Option<&str>) -> SonarResult<BranchList> {
        let params = self.listing_params(project_key)?;
        self.get(endpoint::BRANCHES_LIST, params)
            .await
            .map_err(SonarError::branch_list)
    }

    pub async fn fetch_pull_requests(
        &self,
        project_key: Option<&str>,
    ) -> SonarResult<PullRequestList> {
        let params = self.listing_params(project_key)?;
        self.get(endpoint::PULL_REQUESTS_LIST, params)
            .await
            .map_err(SonarError::pull_request_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportFailure;
    use serde_json::{json, Value};
    use sonar_core::ErrorKind;
    use std::sync::Mutex;

    type Reply = Box<dyn Fn(&str) -> Result<Value, TransportFailure> + Send + Sync>;

    /// Records every request and answers from a closure keyed on path.
    struct FakeTransport {
        calls: Mutex<Vec<(String, QueryParams)>>,
        reply: Reply,
    }

    impl FakeTransport {
        fn new(
            reply: impl Fn(&str) -> Result<Value, TransportFailure> + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply: Box::new(reply),
            })
        }

        fn ok() -> Arc<Self> {
            Self::new(|path| Ok(canned(path)))
        }

        fn failing(failure: TransportFailure) -> Arc<Self> {
            Self::new(move |_| Err(failure.clone()))
        }

        fn calls(&self) -> Vec<(String, QueryParams)> {
            self.calls.lock().unwrap().clone()
        }

        fn last_params(&self) -> QueryParams {
            self.calls().last().expect("no request issued").1.clone()
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportFailure> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), params.clone()));
            (self.reply)(path)
        }
    }

    fn canned(path: &str) -> Value {
        match path {
            endpoint::ISSUES_SEARCH => json!({
                "total": 1,
                "paging": {"pageIndex": 1, "pageSize": 500, "total": 1},
                "issues": [{
                    "key": "AYx1", "rule": "java:S2259", "severity": "MAJOR",
                    "component": "proj1:src/A.java", "project": "proj1", "line": 10,
                    "status": "OPEN", "message": "NPE", "type": "BUG",
                    "creationDate": "2024-01-15T10:30:00+0000",
                    "updateDate": "2024-01-15T10:30:00+0000"
                }]
            }),
            endpoint::MEASURES_COMPONENT => json!({
                "component": {"key": "proj1", "name": "Project One", "qualifier": "TRK", "measures": []}
            }),
            endpoint::QUALITY_GATE_STATUS => json!({
                "projectStatus": {"status": "OK", "conditions": []}
            }),
            endpoint::COMPONENTS_TREE => json!({
                "paging": {"pageIndex": 1, "pageSize": 500, "total": 0},
                "components": []
            }),
            endpoint::BRANCHES_LIST => json!({"branches": []}),
            endpoint::PULL_REQUESTS_LIST => json!({"pullRequests": []}),
            other => panic!("unexpected path {other}"),
        }
    }

    fn config(default_key: Option<&str>) -> Config {
        Config::new(
            "http://localhost:9000",
            "squ_token",
            default_key.map(str::to_string),
        )
        .unwrap()
    }

    fn client(default_key: Option<&str>, transport: Arc<FakeTransport>) -> QueryClient {
        QueryClient::with_transport(config(default_key), transport)
    }

    fn pairs(params: &QueryParams) -> Vec<(&'static str, String)> {
        params.iter().map(|(n, v)| (n, v.to_string())).collect()
    }

    /// Runs every project-scoped operation once with `scope`.
    async fn run_all(client: &QueryClient, scope: &QueryScope) -> Vec<SonarResult<()>> {
        vec![
            client
                .fetch_issues(&IssueQuery {
                    scope: scope.clone(),
                    ..IssueQuery::default()
                })
                .await
                .map(drop),
            client.fetch_code_smells(scope).await.map(drop),
            client.fetch_bugs(scope).await.map(drop),
            client.fetch_vulnerabilities(scope).await.map(drop),
            client.fetch_security_hotspots(scope).await.map(drop),
            client.fetch_metrics::<String>(scope, &[]).await.map(drop),
            client.fetch_coverage(scope).await.map(drop),
            client.fetch_project_status(scope).await.map(drop),
            client.fetch_components(scope).await.map(drop),
            client
                .fetch_branches(scope.project_key.as_deref())
                .await
                .map(drop),
            client
                .fetch_pull_requests(scope.project_key.as_deref())
                .await
                .map(drop),
        ]
    }

    #[tokio::test]
    async fn bugs_with_configured_default_key() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        let bugs = client.fetch_bugs(&QueryScope::default()).await.unwrap();
        assert_eq!(bugs.len(), 1);

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/issues/search");
        assert_eq!(
            pairs(&calls[0].1),
            vec![
                ("componentKeys", "proj1".to_string()),
                ("ps", "500".to_string()),
                ("types", "BUG".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn metrics_default_keys_on_branch() {
        let transport = FakeTransport::ok();
        let client = client(None, transport.clone());

        let scope = QueryScope::project("proj1").with_branch("release/2.0");
        client.fetch_metrics::<String>(&scope, &[]).await.unwrap();

        assert_eq!(
            pairs(&transport.last_params()),
            vec![
                ("component", "proj1".to_string()),
                ("metricKeys", DEFAULT_METRIC_KEYS.join(",")),
                ("branch", "release/2.0".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn issues_for_pull_request() {
        let transport = FakeTransport::ok();
        let client = client(None, transport.clone());

        let query = IssueQuery {
            scope: QueryScope::project("proj1").with_pull_request("42"),
            ..IssueQuery::default()
        };
        client.fetch_issues(&query).await.unwrap();

        assert_eq!(
            pairs(&transport.last_params()),
            vec![
                ("componentKeys", "proj1".to_string()),
                ("ps", "500".to_string()),
                ("pullRequest", "42".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn issue_filters_are_comma_joined() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        let query = IssueQuery {
            types: vec!["BUG".into(), "VULNERABILITY".into()],
            severities: vec!["CRITICAL".into(), "BLOCKER".into()],
            statuses: Vec::new(),
            ..IssueQuery::default()
        };
        client.fetch_issues(&query).await.unwrap();

        let params = transport.last_params();
        assert_eq!(params.get("types"), Some("BUG,VULNERABILITY"));
        assert_eq!(params.get("severities"), Some("CRITICAL,BLOCKER"));
        assert!(!params.contains("statuses"));
    }

    #[tokio::test]
    async fn pull_request_beats_branch_everywhere() {
        let transport = FakeTransport::ok();
        let client = client(None, transport.clone());

        let scope = QueryScope::project("proj1")
            .with_branch("feature/login")
            .with_pull_request("77");
        for result in run_all(&client, &scope).await {
            result.unwrap();
        }

        for (path, params) in transport.calls() {
            if path == endpoint::BRANCHES_LIST || path == endpoint::PULL_REQUESTS_LIST {
                assert!(!params.contains("branch"), "{path}");
                assert!(!params.contains("pullRequest"), "{path}");
                continue;
            }
            assert_eq!(params.get("pullRequest"), Some("77"), "{path}");
            assert!(!params.contains("branch"), "{path}");
        }
    }

    #[tokio::test]
    async fn branch_argument_is_resolved() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        client
            .fetch_project_status(&QueryScope::default().with_branch("PR-636"))
            .await
            .unwrap();
        let params = transport.last_params();
        assert_eq!(params.get("projectKey"), Some("proj1"));
        assert_eq!(params.get("pullRequest"), Some("636"));
        assert!(!params.contains("branch"));

        client
            .fetch_project_status(&QueryScope::default().with_branch("main"))
            .await
            .unwrap();
        assert_eq!(transport.last_params().get("branch"), Some("main"));
    }

    #[tokio::test]
    async fn missing_project_key_sends_nothing() {
        let transport = FakeTransport::ok();
        let client = client(None, transport.clone());

        let results = run_all(&client, &QueryScope::default()).await;
        assert_eq!(results.len(), 11);
        for result in results {
            let err = result.unwrap_err();
            assert!(matches!(err, SonarError::MissingProjectKey), "{err}");
        }
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failed_everywhere() {
        let transport = FakeTransport::failing(TransportFailure::Status(401));
        let client = client(Some("proj1"), transport.clone());

        for result in run_all(&client, &QueryScope::default()).await {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::AuthenticationFailed);
        }
        assert_eq!(transport.calls().len(), 11);
    }

    #[tokio::test]
    async fn operation_specific_wrappers() {
        let transport = FakeTransport::failing(TransportFailure::Status(500));
        let client = client(Some("proj1"), transport);

        let err = client.fetch_bugs(&QueryScope::default()).await.unwrap_err();
        assert!(matches!(err, SonarError::IssueFetchFailed(_)));
        assert!(err.to_string().starts_with("Failed to fetch issues:"));

        let err = client.fetch_branches(None).await.unwrap_err();
        assert!(matches!(err, SonarError::BranchListFetchFailed(_)));

        let err = client.fetch_pull_requests(None).await.unwrap_err();
        assert!(matches!(err, SonarError::PullRequestListFetchFailed(_)));

        let err = client
            .fetch_project_status(&QueryScope::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SonarError::Upstream(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_server_unreachable() {
        let transport = FakeTransport::failing(TransportFailure::Unreachable("refused".into()));
        let client = client(Some("proj1"), transport);

        let err = client
            .fetch_coverage(&QueryScope::default())
            .await
            .unwrap_err();
        assert!(
            matches!(&err, SonarError::ServerUnreachable { url } if url == "http://localhost:9000")
        );
    }

    #[tokio::test]
    async fn coverage_without_metrics_is_zero() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        let summary = client.fetch_coverage(&QueryScope::default()).await.unwrap();
        assert_eq!(summary.component, "proj1");
        assert_eq!(summary.coverage, 0.0);
        assert_eq!(summary.line_coverage, 0.0);
        assert_eq!(summary.branch_coverage, 0.0);
        assert_eq!(summary.uncovered_lines, 0.0);
        assert_eq!(summary.uncovered_conditions, 0.0);

        assert_eq!(
            transport.last_params().get("metricKeys"),
            Some("coverage,line_coverage,branch_coverage,uncovered_lines,uncovered_conditions")
        );
    }

    #[tokio::test]
    async fn coverage_reads_reported_metrics() {
        let transport = FakeTransport::new(|_| {
            Ok(json!({
                "component": {
                    "key": "proj1", "name": "P", "qualifier": "TRK",
                    "measures": [
                        {"metric": "coverage", "value": "72.4"},
                        {"metric": "uncovered_lines", "value": "310"}
                    ]
                }
            }))
        });
        let client = client(Some("proj1"), transport);

        let summary = client.fetch_coverage(&QueryScope::default()).await.unwrap();
        assert_eq!(summary.coverage, 72.4);
        assert_eq!(summary.uncovered_lines, 310.0);
        assert_eq!(summary.branch_coverage, 0.0);
    }

    #[tokio::test]
    async fn explicit_metric_keys_replace_defaults() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        client
            .fetch_metrics(&QueryScope::default(), &["ncloc", "complexity"])
            .await
            .unwrap();
        assert_eq!(
            transport.last_params().get("metricKeys"),
            Some("ncloc,complexity")
        );
    }

    #[tokio::test]
    async fn components_request_files_only() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        client
            .fetch_components(&QueryScope::default())
            .await
            .unwrap();
        assert_eq!(
            pairs(&transport.last_params()),
            vec![
                ("component", "proj1".to_string()),
                ("qualifiers", "FIL".to_string()),
                ("ps", "500".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn listings_take_project_param() {
        let transport = FakeTransport::ok();
        let client = client(Some("proj1"), transport.clone());

        client.fetch_branches(Some("other")).await.unwrap();
        client.fetch_pull_requests(None).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].0, endpoint::BRANCHES_LIST);
        assert_eq!(pairs(&calls[0].1), vec![("project", "other".to_string())]);
        assert_eq!(calls[1].0, endpoint::PULL_REQUESTS_LIST);
        assert_eq!(pairs(&calls[1].1), vec![("project", "proj1".to_string())]);
    }

    /// Only the first page of 500 is fetched. When the server reports more
    /// matches than it returned, the result is the truncated first page; the
    /// shortfall is logged, not hidden behind extra requests.
    #[tokio::test]
    async fn issues_beyond_first_page_are_not_fetched() {
        let transport = FakeTransport::new(|_| {
            Ok(json!({
                "total": 812,
                "paging": {"pageIndex": 1, "pageSize": 500, "total": 812},
                "issues": [{
                    "key": "AYx2", "rule": "js:S1854", "severity": "MINOR",
                    "component": "proj1:a.js", "project": "proj1",
                    "status": "OPEN", "message": "dead store", "type": "CODE_SMELL",
                    "creationDate": "2024-03-01T00:00:00+0000",
                    "updateDate": "2024-03-01T00:00:00+0000"
                }]
            }))
        });
        let client = client(Some("proj1"), transport.clone());

        let issues = client.fetch_code_smells(&QueryScope::default()).await.unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn undecodable_body_is_upstream_error() {
        let transport = FakeTransport::new(|_| Ok(json!({"unexpected": true})));
        let client = client(Some("proj1"), transport);

        let err = client
            .fetch_metrics::<String>(&QueryScope::default(), &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert!(err.to_string().contains("/measures/component"));
    }

    #[tokio::test]
    async fn issue_order_is_preserved() {
        let transport = FakeTransport::new(|_| {
            let issue = |key: &str, severity: &str| {
                json!({
                    "key": key, "rule": "r", "severity": severity,
                    "component": "c", "project": "proj1",
                    "status": "OPEN", "message": "m", "type": "BUG",
                    "creationDate": "2024-01-01T00:00:00+0000",
                    "updateDate": "2024-01-01T00:00:00+0000"
                })
            };
            Ok(json!({
                "total": 3,
                "issues": [issue("c", "INFO"), issue("a", "BLOCKER"), issue("b", "MAJOR")]
            }))
        });
        let client = client(Some("proj1"), transport);

        let issues = client.fetch_bugs(&QueryScope::default()).await.unwrap();
        let keys: Vec<_> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn security_hotspots_decode_review_status() {
        let transport = FakeTransport::new(|_| {
            Ok(json!({
                "total": 1,
                "issues": [{
                    "key": "AYh1", "rule": "java:S2068",
                    "component": "proj1:src/Db.java", "project": "proj1", "line": 7,
                    "status": "TO_REVIEW", "message": "Review this hard-coded password.",
                    "type": "SECURITY_HOTSPOT",
                    "creationDate": "2024-02-01T09:00:00+0000",
                    "updateDate": "2024-02-01T09:00:00+0000"
                }]
            }))
        });
        let client = client(Some("proj1"), transport.clone());

        let hotspots = client
            .fetch_security_hotspots(&QueryScope::default())
            .await
            .unwrap();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].severity, None);
        assert_eq!(hotspots[0].status, sonar_core::IssueStatus::ToReview);
        assert_eq!(transport.last_params().get("types"), Some("SECURITY_HOTSPOT"));
    }
}
