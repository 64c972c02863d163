use sonar_client::{QueryClient, QueryScope};

/// Query the server with the configured credentials.
///
/// With a default project key the quality gate is fetched; without one only
/// the configuration is reported, since every endpoint needs a project.
pub async fn execute(client: &QueryClient) -> anyhow::Result<()> {
    let config = client.config();
    println!("SonarQube URL: {}", config.base_url);

    let Some(key) = config.default_project_key.as_deref() else {
        println!("Default project: (not set)");
        println!("Skipping server check; pass --project-key or set SONARQUBE_PROJECT_KEY.");
        return Ok(());
    };
    println!("Default project: {key}");

    let report = client.fetch_project_status(&QueryScope::default()).await?;
    println!("Quality gate: {}", report.project_status.status);

    let branches = client.fetch_branches(None).await?;
    let main = branches
        .branches
        .iter()
        .find(|b| b.is_main)
        .map(|b| b.name.as_str())
        .unwrap_or("unknown");
    println!("Branches: {} (main: {main})", branches.branches.len());
    Ok(())
}
