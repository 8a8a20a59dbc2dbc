//! Session-token issuance.
//!
//! The avatar provider authenticates streams with short-lived tokens minted
//! from a server-held API key. [`SessionInitiator`] turns a recipe into a
//! persona config and asks a [`TokenIssuer`] (normally the HTTP
//! [`SessionTokenClient`]) for a token; the key never leaves the server.

mod client;
mod initiator;
mod types;

pub use client::{SessionTokenClient, SessionTokenClientBuilder};
pub use initiator::SessionInitiator;
pub use types::{SessionParams, SessionToken, SessionTokenRequest, SessionTokenResponse};

use crate::persona::PersonaConfig;
use crate::Result;
use async_trait::async_trait;

/// Mints a session token for a persona.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue(&self, persona: &PersonaConfig) -> Result<SessionToken>;
}
