mod cmd_branch;
mod cmd_check;
mod git;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sonar_client::{env_keys, Config, QueryClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sonar-bridge",
    version,
    about = "Expose SonarQube analysis results to coding agents over MCP"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

/// Overrides for values otherwise read from the environment.
#[derive(Args, Debug, Default, Clone)]
struct ConnectionArgs {
    /// SonarQube base URL (overrides SONARQUBE_URL)
    #[arg(long)]
    url: Option<String>,
    /// Default project key (overrides SONARQUBE_PROJECT_KEY)
    #[arg(long)]
    project_key: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Start MCP server (stdio transport, JSON-RPC 2.0)
    Serve {
        #[command(flatten)]
        conn: ConnectionArgs,
    },
    /// Validate configuration and query the SonarQube server
    Check {
        #[command(flatten)]
        conn: ConnectionArgs,
    },
    /// Show the detected git branch and how a branch argument resolves
    Branch {
        /// Value to classify (defaults to the current git branch)
        value: Option<String>,
    },
}

/// Default directives when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str =
    "sonar_bridge=info,sonar_core=info,sonar_client=info,sonar_mcp=info";

fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    init_logging();
    if let Some(warning) = dotenv_warning(&dotenv) {
        tracing::warn!("{warning}");
    }

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.cmd {
        Command::Serve { conn } => {
            let client = QueryClient::new(load_config(&conn)?);
            let git_branch = git::current_branch(&cwd);
            tokio::runtime::Runtime::new()?.block_on(sonar_mcp::serve(client, git_branch))?;
            Ok(())
        }
        Command::Check { conn } => {
            let client = QueryClient::new(load_config(&conn)?);
            tokio::runtime::Runtime::new()?.block_on(cmd_check::execute(&client))
        }
        Command::Branch { value } => cmd_branch::execute(&cwd, value.as_deref()),
    }
}

/// Logs go to stderr; stdout belongs to the MCP stream.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// A missing `.env` is normal; anything else (unreadable, malformed) is reported.
fn dotenv_warning(result: &Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            None
        }
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!("ignoring .env: {e}")),
    }
}

fn load_config(conn: &ConnectionArgs) -> anyhow::Result<Config> {
    let config = Config::from_lookup(with_overrides(conn, |key| std::env::var(key).ok()))?;
    tracing::info!(
        url = %config.base_url,
        project_key = ?config.default_project_key,
        "configuration loaded"
    );
    Ok(config)
}

/// Layer command-line values over an environment lookup.
fn with_overrides<'a, F>(conn: &'a ConnectionArgs, env: F) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key: &str| {
        let flag = match key {
            env_keys::URL => conn.url.clone(),
            env_keys::PROJECT_KEY => conn.project_key.clone(),
            _ => None,
        };
        flag.or_else(|| env(key))
    }
}
