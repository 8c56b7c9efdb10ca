//! Config command: print the effective geometry configuration as YAML.

use std::path::PathBuf;

use super::common::load_config;

pub fn cmd_config(config: Option<PathBuf>) -> Result<(), String> {
    let config = load_config(config.as_deref())?;
    let yaml = serde_yaml::to_string(&config).map_err(|e| format!("Failed to encode YAML: {}", e))?;
    print!("{}", yaml);
    Ok(())
}
