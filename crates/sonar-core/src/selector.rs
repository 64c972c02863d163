//! Branch / pull-request disambiguation.
//!
//! Every branch-aware request goes through [`select`], so the rule that an
//! explicit pull request beats a branch argument holds for all operations.

/// Analysis context a request targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BranchSelector {
    Branch(String),
    PullRequest(String),
    #[default]
    None,
}

impl BranchSelector {
    /// The single query parameter this selector contributes, if any.
    pub fn query_param(&self) -> Option<(&'static str, &str)> {
        match self {
            BranchSelector::Branch(name) => Some(("branch", name.as_str())),
            BranchSelector::PullRequest(id) => Some(("pullRequest", id.as_str())),
            BranchSelector::None => None,
        }
    }

    /// Human-readable label, e.g. `branch release/2.0` or `PR #42`.
    pub fn describe(&self) -> Option<String> {
        match self {
            BranchSelector::Branch(name) => Some(format!("branch {name}")),
            BranchSelector::PullRequest(id) => Some(format!("PR #{id}")),
            BranchSelector::None => None,
        }
    }
}

/// Classify a raw branch argument.
///
/// `PR-<digits>` and bare digits are pull requests, anything else non-empty
/// is a branch. A branch whose name is only digits therefore always resolves
/// as a pull request; callers that really mean such a branch cannot express
/// it through this function.
pub fn resolve(raw: Option<&str>) -> BranchSelector {
    let value = match raw.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return BranchSelector::None,
    };

    if let Some(id) = pr_number(value) {
        tracing::debug!(raw = value, pull_request = id, "resolved as pull request");
        return BranchSelector::PullRequest(id.to_string());
    }

    tracing::debug!(branch = value, "resolved as branch");
    BranchSelector::Branch(value.to_string())
}

/// Combine an explicit pull-request argument with a branch argument.
///
/// The pull request wins whenever it is non-empty; the branch argument is
/// then ignored entirely.
pub fn select(branch: Option<&str>, pull_request: Option<&str>) -> BranchSelector {
    if let Some(pr) = pull_request.map(str::trim).filter(|p| !p.is_empty()) {
        let id = pr_number(pr).unwrap_or(pr);
        if branch.is_some_and(|b| !b.trim().is_empty()) {
            tracing::debug!(pull_request = id, "pull request overrides branch argument");
        }
        return BranchSelector::PullRequest(id.to_string());
    }
    resolve(branch)
}

/// `"42"` -> `Some("42")`, `"PR-42"` -> `Some("42")`, otherwise `None`.
fn pr_number(value: &str) -> Option<&str> {
    let digits = value.strip_prefix("PR-").unwrap_or(value);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(digits)
    } else {
        None
    }
}
