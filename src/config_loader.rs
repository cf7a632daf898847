// Configuration file loader
//
// This module seeds environment variables from an optional flat TOML file so
// the configuration structs can keep reading from the environment.
//
// Precedence (highest to lowest):
// 1. Environment variables already set
// 2. Configuration file values
// 3. Application defaults (handled by the config structs)

use std::env;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use toml::Value;

const CONFIG_FILE_PATH: &str = "video_transcriber.conf";

/// Loads the configuration file and exports its entries as environment variables
///
/// # Returns
///
/// Returns true if the config file was successfully loaded, false otherwise
pub fn load_config() -> bool {
    let config_path = Path::new(CONFIG_FILE_PATH);

    if !config_path.exists() {
        debug!("Configuration file not found at: {}", CONFIG_FILE_PATH);
        return false;
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read configuration file: {}", e);
            return false;
        }
    };

    let values: Value = match content.parse() {
        Ok(values) => values,
        Err(e) => {
            warn!("Failed to parse configuration file: {}", e);
            return false;
        }
    };

    // The file is expected to be flat key-value pairs
    if let Value::Table(table) = values {
        for (key, value) in table {
            let value = match value {
                Value::String(s) => s,
                Value::Integer(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                Value::Boolean(b) => b.to_string(),
                _ => {
                    warn!("Skipping unsupported TOML value type for key: {}", key);
                    continue;
                }
            };

            // Only set if the environment variable doesn't already exist
            if env::var(&key).is_err() {
                debug!("Setting env var from config file: {}", key);
                env::set_var(key, value);
            } else {
                debug!("Env var already exists, skipping: {}", key);
            }
        }
    }

    info!("Configuration loaded from {}", CONFIG_FILE_PATH);
    true
}
