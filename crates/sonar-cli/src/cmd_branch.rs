use std::path::Path;

use sonar_core::{resolve, BranchSelector};

use crate::git;

pub fn execute(cwd: &Path, value: Option<&str>) -> anyhow::Result<()> {
    let detected = git::current_branch(cwd);
    match &detected {
        Some(name) => println!("Git branch: {name}"),
        None => println!("Git branch: (none detected)"),
    }

    let Some(raw) = value.or(detected.as_deref()) else {
        return Ok(());
    };
    println!("'{raw}' resolves to: {}", describe(&resolve(Some(raw))));
    Ok(())
}

fn describe(selector: &BranchSelector) -> String {
    match selector.query_param() {
        Some((name, value)) => format!(
            "{} ({name}={value})",
            selector.describe().unwrap_or_default()
        ),
        None => "default branch".to_string(),
    }
}
