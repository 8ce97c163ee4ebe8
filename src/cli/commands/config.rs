//! Config Command
//!
//! Manage triagent configuration.
//!
//! Usage:
//!   triagent config show
//!   triagent config path
//!   triagent config init [--force]

use crate::config::ConfigLoader;
use crate::types::{Result, TriageError};

/// Show the merged effective configuration. Secrets are skipped during
/// serialization and never appear in the output.
pub fn show() -> Result<()> {
    let config = ConfigLoader::load()?;
    let toml = toml::to_string_pretty(&config)
        .map_err(|e| TriageError::Config(format!("Failed to render config: {}", e)))?;
    println!("{}", toml);
    Ok(())
}

/// Show configuration file paths and whether each exists.
pub fn path() -> Result<()> {
    if let Some(global_path) = ConfigLoader::global_config_path() {
        println!(
            "Global:  {} {}",
            global_path.display(),
            if global_path.exists() { "(exists)" } else { "(missing)" }
        );
    }

    let project_path = ConfigLoader::project_config_path();
    println!(
        "Project: {} {}",
        project_path.display(),
        if project_path.exists() { "(exists)" } else { "(missing)" }
    );

    Ok(())
}

/// Write a default project configuration file.
pub fn init(force: bool) -> Result<()> {
    let path = ConfigLoader::init_project(force)?;
    println!("✓ Initialized project configuration");
    println!("  Config: {}", path.display());
    Ok(())
}
