//! Common utilities shared across CLI commands.

use std::fs;
use std::path::Path;

use burner_face::GeometryConfig;

/// Load a geometry configuration from a YAML file, or the defaults when no
/// file is given. The result is validated before it is returned.
///
/// Keys may be partial; missing lengths fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GeometryConfig, String> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
            serde_yaml::from_str(&content).map_err(|e| format!("Failed to parse config YAML: {}", e))?
        }
        None => GeometryConfig::default(),
    };

    config.validate().map_err(|e| e.to_string())?;
    tracing::debug!(center_distance = config.center_distance(), "configuration loaded");
    Ok(config)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| format!("Failed to encode JSON: {}", e))?;
    println!("{}", text);
    Ok(())
}
