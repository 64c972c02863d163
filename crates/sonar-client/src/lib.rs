//! SonarQube Web API client.
//!
//! [`QueryClient`] builds the query parameters for each endpoint, sends the
//! request through a [`Transport`] and normalizes the JSON into the records
//! defined in `sonar-core`. Failures are classified once, in
//! [`transport::classify`].

pub mod client;
pub mod config;
pub mod params;
pub mod transport;

pub use client::{endpoint, IssueQuery, QueryClient, QueryScope, PAGE_SIZE};
pub use config::{env_keys, Config, DEFAULT_URL};
pub use params::QueryParams;
pub use transport::{classify, Transport, TransportFailure, UreqTransport, REQUEST_TIMEOUT};
