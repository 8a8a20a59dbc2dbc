//! HTTP surface: the session-token route plus read-only recipe endpoints.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `POST /api/session-token` | Mint a provider session token |
//! | `GET /api/recipes` | List `{ recipeId, title }` |
//! | `GET /api/recipes/:id` | Full recipe record |
//! | `GET /api/recipes/:id/prompt` | System prompt compiled from the recipe (text/plain) |
//! | `GET /health` | Liveness |

mod handlers;

use crate::config::AppConfig;
use crate::recipe::RecipeBook;
use crate::session::{SessionInitiator, SessionTokenClient};
use crate::{Error, ErrorContext, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Shared, immutable state for all handlers.
pub struct AppState {
    pub initiator: SessionInitiator,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/session-token", post(handlers::create_session_token))
        .route("/api/recipes", get(handlers::list_recipes))
        .route("/api/recipes/:id", get(handlers::get_recipe))
        .route("/api/recipes/:id/prompt", get(handlers::get_prompt))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Assemble state from configuration: load the recipe book and build the
/// provider client.
pub async fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let book = Arc::new(RecipeBook::load(&config.recipes_path).await?);
    if let Some(id) = config.default_recipe.as_deref() {
        book.require(id)?;
    }
    let client = SessionTokenClient::from_config(config)?;
    let initiator = SessionInitiator::new(book, Arc::new(client))
        .with_persona(config.persona.clone())
        .with_default_recipe(config.default_recipe.clone())
        .with_default_source(config.prompt_source);
    Ok(Arc::new(AppState { initiator }))
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = build_state(config).await?;
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to bind: {}", e),
                ErrorContext::new()
                    .with_field_path("AVATAR_CHEF_BIND")
                    .with_details(config.bind.clone()),
            )
        })?;
    tracing::info!(addr = %config.bind, endpoint = %config.endpoint, "avatar-chef listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
