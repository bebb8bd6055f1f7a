//! HTTP client for the single probe request
//!
//! Sends one chat completion request and classifies what came back. Every
//! outcome is either a `ProbeReply` (the endpoint answered 200 with JSON) or a
//! `ProbeError`; nothing here panics or retries.

use crate::core::config::Config;
use crate::models::openai::OpenAIChatCompletionRequest;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, warn};

/// Error types that can occur while probing the endpoint
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// DNS, connect, TLS or body read failure
    #[error("{0}")]
    Transport(String),

    /// Rendered with `Duration`'s `Debug` form, e.g. "30s" or "200ms"
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error (status {status}): {body}")]
    Http { status: u16, body: String },

    /// 200 response whose body could not be interpreted
    #[error("{message}")]
    Parse { status: u16, message: String },
}

impl ProbeError {
    /// HTTP status, when a response was received at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeError::Http { status, .. } | ProbeError::Parse { status, .. } => Some(*status),
            ProbeError::Transport(_) | ProbeError::Timeout(_) => None,
        }
    }
}

/// Successful probe outcome
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeReply {
    /// `choices[0].message.content` from a chat completion response
    Completion { status: u16, content: Value },

    /// Valid JSON with `choices` missing or empty
    UnexpectedFormat { status: u16, data: Value },
}

impl ProbeReply {
    pub fn status(&self) -> u16 {
        match self {
            ProbeReply::Completion { status, .. } | ProbeReply::UnexpectedFormat { status, .. } => {
                *status
            }
        }
    }
}

/// Client posting to a single configured endpoint
pub struct ProbeClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ProbeClient {
    /// Create a new probe client
    ///
    /// # Arguments
    ///
    /// * `base_url` - Endpoint URL, posted to as given
    /// * `api_key` - Bearer token
    /// * `timeout` - Total request timeout
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProbeError> {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    /// Send the request and classify the response
    ///
    /// # Errors
    ///
    /// Returns `ProbeError` for transport failures, timeouts, non-200
    /// statuses and unparseable 200 bodies.
    pub async fn send(
        &self,
        request: &OpenAIChatCompletionRequest,
    ) -> Result<ProbeReply, ProbeError> {
        debug!("POST {} model={}", self.base_url, request.model);

        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        debug!("Received status {} with {} byte body", status, body.len());

        classify_response(status, &body)
    }

    fn transport_error(&self, err: reqwest::Error) -> ProbeError {
        if err.is_timeout() {
            warn!("Request to {} timed out", self.base_url);
            return ProbeError::Timeout(self.timeout);
        }
        warn!("Request to {} failed: {}", self.base_url, err);
        ProbeError::Transport(error_chain(&err))
    }
}

/// Interpret a received response
///
/// Only status 200 counts as success. A 200 body must be JSON. A missing or
/// empty `choices` is reported as an unexpected format; any other `choices`
/// must be an array whose first element has `message.content`.
pub fn classify_response(status: u16, body: &str) -> Result<ProbeReply, ProbeError> {
    if status != 200 {
        return Err(ProbeError::Http {
            status,
            body: body.to_string(),
        });
    }

    let data: Value = serde_json::from_str(body).map_err(|e| ProbeError::Parse {
        status,
        message: format!("Invalid JSON in response body: {}", e),
    })?;

    let choices_empty = match data.get("choices") {
        None => true,
        Some(Value::Array(choices)) => choices.is_empty(),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(_) => false,
    };
    if choices_empty {
        debug!("Response has no choices");
        return Ok(ProbeReply::UnexpectedFormat { status, data });
    }

    let Some(choices) = data["choices"].as_array() else {
        return Err(ProbeError::Parse {
            status,
            message: "Response field choices is not an array".to_string(),
        });
    };

    let content = choices[0]
        .get("message")
        .and_then(|m| m.get("content"))
        .cloned()
        .ok_or_else(|| ProbeError::Parse {
            status,
            message: "Response missing choices[0].message.content".to_string(),
        })?;
    Ok(ProbeReply::Completion { status, content })
}

/// Flatten an error and its sources into one line
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
