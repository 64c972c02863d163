pub mod render;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use schemars::JsonSchema;
use serde::Deserialize;

use sonar_client::{IssueQuery, QueryClient, QueryScope};
use sonar_core::{ErrorKind, IssueType, SonarError};

// --- Tool parameter structs ---

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct IssuesParams {
    /// Project key (optional, uses default if not provided)
    project_key: Option<String>,
    /// Issue types to filter by (CODE_SMELL, BUG, VULNERABILITY, SECURITY_HOTSPOT)
    types: Option<Vec<String>>,
    /// Severities to filter by (INFO, MINOR, MAJOR, CRITICAL, BLOCKER)
    severities: Option<Vec<String>>,
    /// Statuses to filter by (OPEN, CONFIRMED, REOPENED, RESOLVED, CLOSED, TO_REVIEW, REVIEWED)
    statuses: Option<Vec<String>>,
    /// Git branch to analyze (optional, uses default branch if not provided)
    branch: Option<String>,
    /// Pull request number to analyze (e.g., "636" for PR #636)
    pull_request: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ScopeParams {
    /// Project key (optional, uses default if not provided)
    project_key: Option<String>,
    /// Git branch to analyze (optional, uses default branch if not provided)
    branch: Option<String>,
    /// Pull request number to analyze (e.g., "636" for PR #636)
    pull_request: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct MetricsParams {
    /// Project key (optional, uses default if not provided)
    project_key: Option<String>,
    /// Specific metrics to retrieve (optional)
    metric_keys: Option<Vec<String>>,
    /// Git branch to analyze (optional, uses default branch if not provided)
    branch: Option<String>,
    /// Pull request number to analyze (e.g., "636" for PR #636)
    pull_request: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ProjectParams {
    /// Project key (optional, uses default if not provided)
    project_key: Option<String>,
}

impl ScopeParams {
    fn into_scope(self) -> QueryScope {
        QueryScope {
            project_key: self.project_key,
            branch: self.branch,
            pull_request: self.pull_request,
        }
    }
}

// --- MCP Server ---

/// MCP server exposing SonarQube analysis results.
#[derive(Clone)]
pub struct SonarServer {
    client: QueryClient,
    git_branch: Option<String>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SonarServer {
    /// `git_branch` is the local checkout's branch, shown to the agent as a
    /// hint only; it is never sent unless the agent passes it back.
    pub fn new(client: QueryClient, git_branch: Option<String>) -> Self {
        Self {
            client,
            git_branch,
            tool_router: Self::tool_router(),
        }
    }

    async fn typed_issues(
        &self,
        issue_type: IssueType,
        params: ScopeParams,
    ) -> Result<CallToolResult, McpError> {
        let scope = params.into_scope();
        let context = scope.selector().describe();
        let list = self
            .client
            .fetch_by_type(issue_type, &scope)
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::typed_issues(issue_type.plural(), &list, context.as_deref()),
        )]))
    }

    /// Get all issues (bugs, vulnerabilities, code smells) from SonarQube
    #[tool(description = "Get all issues (bugs, vulnerabilities, code smells) from SonarQube")]
    async fn get_issues(
        &self,
        Parameters(params): Parameters<IssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = IssueQuery {
            scope: QueryScope {
                project_key: params.project_key,
                branch: params.branch,
                pull_request: params.pull_request,
            },
            types: params.types.unwrap_or_default(),
            severities: params.severities.unwrap_or_default(),
            statuses: params.statuses.unwrap_or_default(),
        };
        let context = query.scope.selector().describe();
        let list = self.client.fetch_issues(&query).await.map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(render::issues(
            &list,
            context.as_deref(),
        ))]))
    }

    /// Get code smells from SonarQube
    #[tool(description = "Get code smells from SonarQube")]
    async fn get_code_smells(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.typed_issues(IssueType::CodeSmell, params).await
    }

    /// Get bugs from SonarQube
    #[tool(description = "Get bugs from SonarQube")]
    async fn get_bugs(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.typed_issues(IssueType::Bug, params).await
    }

    /// Get vulnerabilities from SonarQube
    #[tool(description = "Get vulnerabilities from SonarQube")]
    async fn get_vulnerabilities(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.typed_issues(IssueType::Vulnerability, params).await
    }

    /// Get security hotspots from SonarQube
    #[tool(description = "Get security hotspots from SonarQube")]
    async fn get_security_hotspots(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.typed_issues(IssueType::SecurityHotspot, params).await
    }

    /// Get code coverage metrics from SonarQube
    #[tool(description = "Get code coverage metrics from SonarQube")]
    async fn get_coverage(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let scope = params.into_scope();
        let context = scope.selector().describe();
        let summary = self
            .client
            .fetch_coverage(&scope)
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::coverage(&summary, context.as_deref()),
        )]))
    }

    /// Get various metrics from SonarQube (complexity, duplications, etc.)
    #[tool(description = "Get various metrics from SonarQube (complexity, duplications, etc.)")]
    async fn get_metrics(
        &self,
        Parameters(params): Parameters<MetricsParams>,
    ) -> Result<CallToolResult, McpError> {
        let scope = QueryScope {
            project_key: params.project_key,
            branch: params.branch,
            pull_request: params.pull_request,
        };
        let keys = params.metric_keys.unwrap_or_default();
        let report = self
            .client
            .fetch_metrics(&scope, &keys)
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::metrics(&report),
        )]))
    }

    /// Get quality gate status for the project
    #[tool(description = "Get quality gate status for the project")]
    async fn get_project_status(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let report = self
            .client
            .fetch_project_status(&params.into_scope())
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::project_status(&report),
        )]))
    }

    /// Get project components (files) from SonarQube
    #[tool(description = "Get project components (files) from SonarQube")]
    async fn get_components(
        &self,
        Parameters(params): Parameters<ScopeParams>,
    ) -> Result<CallToolResult, McpError> {
        let tree = self
            .client
            .fetch_components(&params.into_scope())
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::components(&tree),
        )]))
    }

    /// List all available branches in SonarQube for the project (debugging tool)
    #[tool(
        description = "List all available branches in SonarQube for the project (debugging tool)"
    )]
    async fn get_branches(
        &self,
        Parameters(params): Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let list = self
            .client
            .fetch_branches(params.project_key.as_deref())
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::branches(&list),
        )]))
    }

    /// List all available pull requests in SonarQube for the project (debugging tool)
    #[tool(
        description = "List all available pull requests in SonarQube for the project (debugging tool)"
    )]
    async fn get_pull_requests(
        &self,
        Parameters(params): Parameters<ProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let list = self
            .client
            .fetch_pull_requests(params.project_key.as_deref())
            .await
            .map_err(to_mcp_err)?;

        Ok(CallToolResult::success(vec![Content::text(
            render::pull_requests(&list),
        )]))
    }
}

#[tool_handler]
impl ServerHandler for SonarServer {
    fn get_info(&self) -> ServerInfo {
        let mut instructions = String::from(
            "SonarQube bridge: query issues, coverage, metrics and quality gate status. \
             Pass `branch` (or a pull request number such as \"636\" / \"PR-636\") to scope a query.",
        );
        if let Some(branch) = &self.git_branch {
            instructions.push_str(&format!(" The local git checkout is on branch `{branch}`."));
        }
        if let Some(key) = &self.client.config().default_project_key {
            instructions.push_str(&format!(" Default project key: `{key}`."));
        }

        ServerInfo {
            instructions: Some(instructions),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Missing project key is the caller's fault; everything else is reported as
/// a failed upstream call.
fn to_mcp_err(e: SonarError) -> McpError {
    match e.kind() {
        ErrorKind::MissingProjectKey => McpError::invalid_params(e.to_string(), None),
        _ => McpError::internal_error(format!("Error calling SonarQube API: {e}"), None),
    }
}

/// Start the MCP server on stdio transport.
pub async fn serve(client: QueryClient, git_branch: Option<String>) -> anyhow::Result<()> {
    let server = SonarServer::new(client, git_branch);
    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("SonarQube MCP server running on stdio");
    service.waiting().await?;
    Ok(())
}
