use thiserror::Error;

/// Errors surfaced by the SonarQube query layer.
#[derive(Debug, Error)]
pub enum SonarError {
    #[error(
        "Project key is required. Provide projectKey or set the SONARQUBE_PROJECT_KEY environment variable."
    )]
    MissingProjectKey,

    #[error("Authentication failed. Please check your SonarQube token.")]
    AuthenticationFailed,

    #[error("Access denied. Please check your permissions.")]
    PermissionDenied,

    #[error("Resource not found. Please check your project key.")]
    ResourceNotFound,

    #[error(
        "Cannot connect to SonarQube server at {url}. Please check the URL and ensure the server is running."
    )]
    ServerUnreachable { url: String },

    #[error("SonarQube API error: {0}")]
    Upstream(String),

    #[error("Failed to fetch issues: {0}")]
    IssueFetchFailed(#[source] Box<SonarError>),

    #[error("Failed to fetch branches: {0}")]
    BranchListFetchFailed(#[source] Box<SonarError>),

    #[error("Failed to fetch pull requests: {0}")]
    PullRequestListFetchFailed(#[source] Box<SonarError>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Flat classification of a [`SonarError`], ignoring operation wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingProjectKey,
    AuthenticationFailed,
    PermissionDenied,
    ResourceNotFound,
    ServerUnreachable,
    Upstream,
    InvalidConfig,
}

impl SonarError {
    /// Classified kind, looking through `*FetchFailed` wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SonarError::MissingProjectKey => ErrorKind::MissingProjectKey,
            SonarError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            SonarError::PermissionDenied => ErrorKind::PermissionDenied,
            SonarError::ResourceNotFound => ErrorKind::ResourceNotFound,
            SonarError::ServerUnreachable { .. } => ErrorKind::ServerUnreachable,
            SonarError::Upstream(_) => ErrorKind::Upstream,
            SonarError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            SonarError::IssueFetchFailed(inner)
            | SonarError::BranchListFetchFailed(inner)
            | SonarError::PullRequestListFetchFailed(inner) => inner.kind(),
        }
    }

    pub fn issue_fetch(cause: SonarError) -> Self {
        SonarError::IssueFetchFailed(Box::new(cause))
    }

    pub fn branch_list(cause: SonarError) -> Self {
        SonarError::BranchListFetchFailed(Box::new(cause))
    }

    pub fn pull_request_list(cause: SonarError) -> Self {
        SonarError::PullRequestListFetchFailed(Box::new(cause))
    }
}

pub type SonarResult<T> = Result<T, SonarError>;
