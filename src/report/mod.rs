//! Console report
//!
//! Renders the pre-flight banner and the probe outcome. Everything is written
//! to a generic `io::Write` so the exact text can be checked in tests.

use crate::core::client::{ProbeError, ProbeReply};
use crate::core::config::Config;
use crate::core::constants::{marker, request};
use serde_json::Value;
use std::io::{self, Write};

/// First characters of the token followed by "..."
///
/// Counts characters, not bytes, so a multi-byte token is never split.
pub fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(request::TOKEN_PREVIEW_CHARS).collect();
    format!("{}...", head)
}

/// Print the target, model and token preview before sending
pub fn write_banner<W: Write + ?Sized>(out: &mut W, config: &Config) -> io::Result<()> {
    writeln!(out, "{} Testing API...", marker::PENDING)?;
    writeln!(out, "URL: {}", config.base_url)?;
    writeln!(out, "Model: {}", config.model)?;
    writeln!(out, "API Key: {}", token_preview(&config.api_key))
}

/// Print the outcome of the probe
pub fn write_outcome<W: Write + ?Sized>(
    out: &mut W,
    outcome: &Result<ProbeReply, ProbeError>,
) -> io::Result<()> {
    let status = match outcome {
        Ok(reply) => Some(reply.status()),
        Err(err) => err.status(),
    };
    if let Some(status) = status {
        writeln!(out, "{} HTTP Status: {}", marker::STATUS, status)?;
    }

    match outcome {
        Ok(ProbeReply::Completion { content, .. }) => {
            writeln!(out, "{} API is working!", marker::OK)?;
            writeln!(out, "Response: {}", display_value(content))
        }
        Ok(ProbeReply::UnexpectedFormat { data, .. }) => {
            writeln!(out, "{} API connected but response format unexpected", marker::OK)?;
            writeln!(out, "Response: {}", data)
        }
        Err(ProbeError::Http { body, .. }) => {
            writeln!(out, "{} API Error", marker::FAIL)?;
            writeln!(out, "Response: {}", body)
        }
        // Parse failures share the generic line with transport failures.
        Err(err) => write_error(out, err),
    }
}

/// Generic failure line
pub fn write_error<W: Write + ?Sized>(out: &mut W, err: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{} Error: {}", marker::FAIL, err)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
