//! Token source that calls this crate's own `/api/session-token` route, the
//! way a browser client would. No API key is involved on this side.

use super::TokenSource;
use crate::session::{SessionParams, SessionToken, SessionTokenResponse};
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct BackendTokenSource {
    http_client: reqwest::Client,
    url: String,
}

impl BackendTokenSource {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            url: format!("{}/api/session-token", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TokenSource for BackendTokenSource {
    async fn fetch_token(&self, params: &SessionParams) -> Result<SessionToken> {
        let response = self
            .http_client
            .post(&self.url)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                Error::network_with_context(
                    format!("Failed to reach session endpoint: {}", e),
                    ErrorContext::new()
                        .with_source("backend_token_source")
                        .with_details(self.url.clone()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
                .to_string();
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SessionTokenResponse = response.json().await.map_err(|e| {
            Error::network_with_context(
                format!("Invalid session endpoint response: {}", e),
                ErrorContext::new().with_source("backend_token_source"),
            )
        })?;
        Ok(parsed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetches_token_from_backend() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/session-token")
            .match_body(mockito::Matcher::Json(serde_json::json!({ "recipeId": "carbonara" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"sessionToken":"tok-from-backend"}"#)
            .create_async()
            .await;

        let source = BackendTokenSource::new(&format!("{}/", server.url())).unwrap();
        let token = source
            .fetch_token(&SessionParams::for_recipe("carbonara"))
            .await
            .unwrap();
        assert_eq!(token.as_str(), "tok-from-backend");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_backend_error_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/session-token")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Failed to create session"}"#)
            .create_async()
            .await;

        let source = BackendTokenSource::new(&server.url()).unwrap();
        let err = source.fetch_token(&SessionParams::default()).await.unwrap_err();
        match err {
            Error::Remote { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to create session");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
