// Video transcriber configuration
//
// This module contains configuration structures and constants for the service.
// It centralizes all configuration parameters and provides defaults from environment variables.

use std::env;

/// Default values for configuration
pub mod defaults {
    // Base directory for per-request scratch workspaces
    pub const TEMP_DIR: &str = "/tmp/video_transcriber";

    // Bind address for the HTTP server
    pub const HOST: &str = "0.0.0.0";

    // Bind port for the HTTP server
    pub const PORT: &str = "5000";
}

/// Configuration for the request handlers
#[derive(Clone, Debug)]
pub struct HandlerConfig {
    /// Base directory under which scratch workspaces are created
    pub temp_dir: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            temp_dir: env::var("TRANSCRIBER_TMP_FILES")
                .unwrap_or_else(|_| String::from(defaults::TEMP_DIR)),
        }
    }
}

impl HandlerConfig {
    /// Ensures the workspace base directory exists
    pub fn ensure_temp_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.temp_dir)
    }
}

/// Configuration for the HTTP server binding
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind
    pub host: String,
    /// Port to bind
    pub port: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::var("TRANSCRIBER_HOST").unwrap_or_else(|_| String::from(defaults::HOST)),
            port: env::var("TRANSCRIBER_PORT").unwrap_or_else(|_| String::from(defaults::PORT)),
        }
    }
}

impl ServerConfig {
    /// Socket address string suitable for `HttpServer::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
