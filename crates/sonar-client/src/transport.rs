use std::io;
use std::time::Duration;

use base64::Engine as _;
use serde_json::Value;
use sonar_core::SonarError;

use crate::config::Config;
use crate::params::QueryParams;

/// Upper bound on a single request; there is no other cancellation.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a request produced no usable JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// Non-2xx HTTP status.
    Status(u16),
    /// Connection refused, host not found, and similar.
    Unreachable(String),
    TimedOut,
    /// 2xx response whose body is not JSON.
    InvalidBody(String),
    Other(String),
}

/// Map a transport failure onto the error taxonomy.
///
/// Every operation funnels its failures through here exactly once.
pub fn classify(failure: TransportFailure, base_url: &str) -> SonarError {
    match failure {
        TransportFailure::Status(401) => SonarError::AuthenticationFailed,
        TransportFailure::Status(403) => SonarError::PermissionDenied,
        TransportFailure::Status(404) => SonarError::ResourceNotFound,
        TransportFailure::Status(code) => {
            SonarError::Upstream(format!("Request failed with status code {code}"))
        }
        TransportFailure::Unreachable(detail) => {
            tracing::debug!(%detail, "server unreachable");
            SonarError::ServerUnreachable {
                url: base_url.to_string(),
            }
        }
        TransportFailure::TimedOut => SonarError::Upstream(format!(
            "timeout of {}s exceeded",
            REQUEST_TIMEOUT.as_secs()
        )),
        TransportFailure::InvalidBody(detail) => {
            SonarError::Upstream(format!("invalid JSON response: {detail}"))
        }
        TransportFailure::Other(detail) => SonarError::Upstream(detail),
    }
}

/// Blocking GET against the `{base_url}/api` root.
///
/// `path` is relative to the API root, e.g. `/issues/search`.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportFailure>;
}

/// `ureq`-backed transport with basic auth (`token:`) and a 30 s timeout.
pub struct UreqTransport {
    agent: ureq::Agent,
    api_base: String,
    authorization: String,
}

impl UreqTransport {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        Self {
            agent,
            api_base: config.api_base(),
            authorization: basic_auth(&config.token),
        }
    }
}

impl Transport for UreqTransport {
    fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportFailure> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        for (name, value) in params.iter() {
            request = request.query(name, value);
        }

        let mut response = request.call().map_err(failure_from_ureq)?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(failure_from_ureq)?;
        serde_json::from_str(&body).map_err(|e| TransportFailure::InvalidBody(e.to_string()))
    }
}

/// Username is the token, password is empty.
fn basic_auth(token: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{token}:"));
    format!("Basic {encoded}")
}

fn failure_from_ureq(err: ureq::Error) -> TransportFailure {
    match err {
        ureq::Error::StatusCode(code) => TransportFailure::Status(code),
        ureq::Error::HostNotFound => TransportFailure::Unreachable("host not found".into()),
        ureq::Error::ConnectionFailed => {
            TransportFailure::Unreachable("connection failed".into())
        }
        ureq::Error::Timeout(_) => TransportFailure::TimedOut,
        ureq::Error::Io(e) => failure_from_io(&e),
        other => TransportFailure::Other(other.to_string()),
    }
}

fn failure_from_io(e: &io::Error) -> TransportFailure {
    match e.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::AddrNotAvailable
        | io::ErrorKind::NotConnected => TransportFailure::Unreachable(e.to_string()),
        io::ErrorKind::TimedOut => TransportFailure::TimedOut,
        _ => TransportFailure::Other(e.to_string()),
    }
}
