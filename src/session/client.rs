//! HTTP client for the avatar provider's session-token endpoint.

use super::types::{SessionToken, SessionTokenRequest, SessionTokenResponse};
use super::TokenIssuer;
use crate::config::{AppConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::persona::PersonaConfig;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::time::Duration;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Exchanges a persona config for a session token, authenticating with the
/// server-held API key.
pub struct SessionTokenClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl SessionTokenClient {
    pub fn builder() -> SessionTokenClientBuilder {
        SessionTokenClientBuilder::new()
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        SessionTokenClientBuilder::new()
            .api_key(config.require_api_key()?)
            .endpoint(config.endpoint.clone())
            .timeout(config.timeout)
            .build()
    }

    pub async fn create_session_token(&self, persona: &PersonaConfig) -> Result<SessionToken> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let body = SessionTokenRequest {
            persona_config: persona.clone(),
        };

        tracing::info!(
            request_id = %request_id,
            persona = %persona.name,
            prompt_len = persona.system_prompt.len(),
            "requesting session token"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Session token request failed: {}", e),
                    ErrorContext::new()
                        .with_source("session_client")
                        .with_details(format!("request_id={}", request_id)),
                )
            })?;

        let status = response.status();
        let body_str = response.text().await.map_err(|e| {
            Error::network_with_context(
                format!("Failed to read session token response: {}", e),
                ErrorContext::new().with_source("session_client"),
            )
        })?;

        if !status.is_success() {
            tracing::warn!(
                request_id = %request_id,
                status = status.as_u16(),
                "provider rejected session token request"
            );
            let reason = status.canonical_reason().unwrap_or("unknown status");
            let message = if body_str.trim().is_empty() {
                reason.to_string()
            } else {
                format!("{}: {}", reason, body_str.trim())
            };
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SessionTokenResponse = serde_json::from_str(&body_str)?;
        if parsed.session_token.is_empty() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: "response carried an empty sessionToken".to_string(),
            });
        }

        tracing::debug!(request_id = %request_id, "session token issued");
        Ok(parsed.into())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TokenIssuer for SessionTokenClient {
    async fn issue(&self, persona: &PersonaConfig) -> Result<SessionToken> {
        self.create_session_token(persona).await
    }
}

pub struct SessionTokenClientBuilder {
    api_key: Option<String>,
    endpoint: Option<String>,
    timeout: Duration,
}

impl SessionTokenClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SessionTokenClient> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var("ANAM_API_KEY").ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::configuration("API key required (ANAM_API_KEY)"))?;
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        url::Url::parse(&endpoint).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid provider endpoint: {}", e),
                ErrorContext::new().with_details(endpoint.clone()),
            )
        })?;
        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(SessionTokenClient {
            http_client,
            endpoint,
            api_key,
        })
    }
}

impl Default for SessionTokenClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
