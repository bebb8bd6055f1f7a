//! Chat completion API probe
//!
//! Sends one fixed chat completion request to a configured OpenAI-compatible
//! endpoint and prints whether it worked. Every outcome, including
//! configuration errors, is reported on stdout and the process exits 0.

mod core;
mod models;
mod report;

use crate::core::client::ProbeClient;
use crate::core::config::Config;
use crate::core::constants::{env, request};
use crate::core::logging::{DEFAULT_LOG_LEVEL, init_logging};
use crate::models::openai::OpenAIChatCompletionRequest;
use crate::report::{write_banner, write_error, write_outcome};
use std::io::{self, Write};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    dotenv::dotenv().ok();

    let resolved = Config::from_env();
    let log_level = resolved
        .as_ref()
        .map(|cfg| cfg.log_level.as_str())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    init_logging(log_level);

    if let Err(e) = execute(resolved, &mut io::stdout()).await {
        error!("Failed to write report: {}", e);
    }
}

/// Report a configuration failure, or send the request with a valid config
///
/// Only I/O errors on `out` are returned.
async fn execute<W: Write>(resolved: anyhow::Result<Config>, out: &mut W) -> io::Result<()> {
    match resolved {
        Ok(config) => {
            info!("Probing {} with model {}", config.base_url, config.model);
            run(&config, out).await
        }
        Err(e) => {
            write_error(out, &format!("{:#}", e))?;
            out.flush()
        }
    }
}

/// Send the probe request and print the report
///
/// Only I/O errors on `out` are returned; probe failures are part of the
/// report.
async fn run<W: Write>(config: &Config, out: &mut W) -> io::Result<()> {
    write_banner(out, config)?;
    out.flush()?;

    let outcome = match ProbeClient::from_config(config) {
        Ok(client) => {
            client
                .send(&OpenAIChatCompletionRequest::probe(&config.model))
                .await
        }
        Err(e) => Err(e),
    };

    write_outcome(out, &outcome)?;
    out.flush()
}

/// Print help message
fn print_help() {
    println!("API Probe v0.1.0");
    println!();
    println!("Sends a single \"Hello\" chat completion request and reports the result.");
    println!();
    println!("Usage: api-probe [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  {} - Full endpoint URL to POST to (required)", env::BASE_URL);
    println!("  {} - Bearer token (required)", env::API_KEY);
    println!("  {} - Model identifier (required)", env::MODEL);
    println!("  {} - Logging level (default: warn)", env::LOG_LEVEL);
    println!("  {} - Optional TOML file with [probe] and [logging] tables", env::CONFIG_PATH);
    println!();
    println!("Variables may also be placed in a .env file.");
    println!("Request timeout: {}s", request::TIMEOUT_SECS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TomlConfig;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::json;
    use std::time::Duration;

    async fn spawn_endpoint(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1/chat/completions", addr)
    }

    fn config_for(base_url: String, request_timeout: Duration) -> Config {
        Config {
            base_url,
            api_key: "sk-live-0123456789".to_string(),
            model: "anthropic:3.7-sonnet".to_string(),
            log_level: "warn".to_string(),
            request_timeout,
        }
    }

    async fn run_against(router: Router, timeout: Duration) -> String {
        let config = config_for(spawn_endpoint(router).await, timeout);
        let mut out = Vec::new();
        run(&config, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_run_success() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": [{"message": {"content": "Hi there"}}]})) }),
        );
        let text = run_against(router, request::TIMEOUT).await;

        assert!(text.starts_with("🔄 Testing API...\n"));
        assert!(text.contains("API Key: sk-live-01...\n"));
        assert!(text.contains("📡 HTTP Status: 200\n"));
        assert!(text.ends_with("✅ API is working!\nResponse: Hi there\n"));
    }

    #[tokio::test]
    async fn test_run_unexpected_format() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"unexpected": "shape"})) }),
        );
        let text = run_against(router, request::TIMEOUT).await;

        assert!(text.contains("✅ API connected but response format unexpected\n"));
        assert!(text.ends_with("Response: {\"unexpected\":\"shape\"}\n"));
    }

    #[tokio::test]
    async fn test_run_unauthorized() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "Unauthorized") }),
        );
        let text = run_against(router, request::TIMEOUT).await;

        assert!(text.ends_with("📡 HTTP Status: 401\n❌ API Error\nResponse: Unauthorized\n"));
    }

    #[tokio::test]
    async fn test_run_timeout_is_reported() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let text = run_against(router, Duration::from_millis(200)).await;

        assert!(!text.contains("HTTP Status"));
        assert!(text.ends_with("❌ Error: request timed out after 200ms\n"));
    }

    #[tokio::test]
    async fn test_missing_token_reports_error_without_banner() {
        let resolved = Config::resolve(TomlConfig::default(), |key| match key {
            env::BASE_URL => Some("https://llm.example.com/v1/chat/completions".to_string()),
            env::MODEL => Some("anthropic:3.7-sonnet".to_string()),
            _ => None,
        });
        let mut out = Vec::new();
        execute(resolved, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            format!("❌ Error: Bearer token not configured (set {})\n", env::API_KEY)
        );
        assert!(!text.contains("Testing API"));
    }

    #[tokio::test]
    async fn test_valid_config_sends_request() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": [{"message": {"content": "Hi there"}}]})) }),
        );
        let config = config_for(spawn_endpoint(router).await, request::TIMEOUT);
        let mut out = Vec::new();
        execute(Ok(config), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("🔄 Testing API...\n"));
        assert!(text.ends_with("Response: Hi there\n"));
    }

    #[tokio::test]
    async fn test_run_invalid_json_uses_error_line() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { "not json" }),
        );
        let text = run_against(router, request::TIMEOUT).await;

        assert!(text.contains("📡 HTTP Status: 200\n❌ Error: Invalid JSON in response body"));
    }
}
