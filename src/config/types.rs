// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub media: MediaConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, or json)
    pub access_log_format: String,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    /// Whole-connection timeout in seconds; 0 disables it. Disabled by
    /// default because media sessions are long-lived.
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
}

/// Media library configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    /// URL prefix under which the library is served
    pub route_prefix: String,
    /// Filesystem root of the library
    pub library_dir: String,
    /// Read chunk size in bytes for streamed responses. 1 MiB by default to
    /// bound per-chunk overhead when serving video.
    pub chunk_size: usize,
}
