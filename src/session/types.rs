//! Session-token request/response types.

use crate::persona::PersonaConfig;
use crate::prompt::PromptSource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body sent to the provider's session-token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenRequest {
    pub persona_config: PersonaConfig,
}

/// Provider (and server route) response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenResponse {
    pub session_token: String,
}

/// A short-lived credential for opening one avatar stream.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(<{} bytes>)", self.0.len())
    }
}

impl From<SessionTokenResponse> for SessionToken {
    fn from(resp: SessionTokenResponse) -> Self {
        SessionToken(resp.session_token)
    }
}

/// What a client may ask for when starting a session. Both fields are
/// optional; the server falls back to its configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_source: Option<PromptSource>,
}

impl SessionParams {
    pub fn for_recipe(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: Some(recipe_id.into()),
            prompt_source: None,
        }
    }

    pub fn with_prompt_source(mut self, source: PromptSource) -> Self {
        self.prompt_source = Some(source);
        self
    }
}
