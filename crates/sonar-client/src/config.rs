use std::fmt;

use sonar_core::{SonarError, SonarResult};

pub const DEFAULT_URL: &str = "http://localhost:9000";

/// Environment variable names read at startup.
pub mod env_keys {
    pub const URL: &str = "SONARQUBE_URL";
    pub const TOKEN: &str = "SONARQUBE_TOKEN";
    pub const PROJECT_KEY: &str = "SONARQUBE_PROJECT_KEY";
}

/// Connection settings, fixed for the lifetime of a `QueryClient`.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub token: String,
    pub default_project_key: Option<String>,
}

impl Config {
    /// Build and validate a configuration.
    ///
    /// Trailing slashes are removed from `base_url` and a blank default
    /// project key is treated as absent.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        default_project_key: Option<String>,
    ) -> SonarResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let token = token.into().trim().to_string();
        let default_project_key = default_project_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let config = Self {
            base_url,
            token,
            default_project_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Read settings through `lookup` (normally `std::env::var`).
    ///
    /// A missing token is an error; a missing project key only logs a warning
    /// and is checked again when a tool call needs one.
    pub fn from_lookup<F>(lookup: F) -> SonarResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(env_keys::URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let token = lookup(env_keys::TOKEN).unwrap_or_default();
        if token.trim().is_empty() {
            return Err(SonarError::InvalidConfig(format!(
                "{} environment variable is required",
                env_keys::TOKEN
            )));
        }

        let config = Self::new(url, token, lookup(env_keys::PROJECT_KEY))?;
        if config.default_project_key.is_none() {
            tracing::warn!(
                "{} not set - project key will need to be provided in tool calls",
                env_keys::PROJECT_KEY
            );
        }
        Ok(config)
    }

    pub fn validate(&self) -> SonarResult<()> {
        if self.base_url.is_empty() {
            return Err(SonarError::InvalidConfig("SonarQube URL is required".into()));
        }
        if self.token.is_empty() {
            return Err(SonarError::InvalidConfig(
                "SonarQube token is required".into(),
            ));
        }

        let invalid = || {
            SonarError::InvalidConfig(format!("Invalid SonarQube URL: {}", self.base_url))
        };
        let uri: ureq::http::Uri = self.base_url.parse().map_err(|_| invalid())?;
        let scheme_ok = matches!(uri.scheme_str(), Some("http") | Some("https"));
        if !scheme_ok || uri.authority().is_none() {
            return Err(invalid());
        }
        Ok(())
    }

    /// Resolve the project key: explicit argument, then configured default.
    pub fn project_key<'a>(&'a self, explicit: Option<&'a str>) -> SonarResult<&'a str> {
        explicit
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(self.default_project_key.as_deref())
            .ok_or(SonarError::MissingProjectKey)
    }

    /// `{base_url}/api`
    pub fn api_base(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("default_project_key", &self.default_project_key)
            .finish()
    }
}
