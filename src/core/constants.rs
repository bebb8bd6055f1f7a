//! Constants for the probe request and console output
//!
//! The request sent by the probe is fixed; only the endpoint, token and model
//! come from configuration.

use std::time::Duration;

/// Message role constants
pub mod role {
    /// User role identifier
    pub const USER: &str = "user";
}

/// Fixed request parameters
pub mod request {
    use super::Duration;

    /// Prompt sent as the single user message
    pub const PROMPT: &str = "Hello";

    /// Completion token limit
    pub const MAX_TOKENS: u32 = 10;

    /// Request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;

    /// Request timeout
    pub const TIMEOUT: Duration = Duration::from_secs(TIMEOUT_SECS);

    /// Number of token characters shown in the banner
    pub const TOKEN_PREVIEW_CHARS: usize = 10;
}

/// Environment variable names
pub mod env {
    /// Endpoint URL
    pub const BASE_URL: &str = "PROBE_BASE_URL";

    /// Bearer token
    pub const API_KEY: &str = "PROBE_API_KEY";

    /// Model identifier
    pub const MODEL: &str = "PROBE_MODEL";

    /// Logging level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Optional TOML configuration file
    pub const CONFIG_PATH: &str = "CONFIG_PATH";
}

/// Console markers
pub mod marker {
    pub const PENDING: &str = "🔄";
    pub const STATUS: &str = "📡";
    pub const OK: &str = "✅";
    pub const FAIL: &str = "❌";
}
