use super::AppState;
use crate::prompt::PromptSource;
use crate::recipe::{Recipe, RecipeSummary};
use crate::session::{SessionParams, SessionTokenResponse};
use crate::Error;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(super) struct ErrorBody {
    error: String,
}

/// Maps library errors to HTTP responses. Provider and transport failures are
/// logged in full but reported to the client generically.
pub(super) struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::NotFound { id } => (StatusCode::NOT_FOUND, format!("Recipe not found: {}", id)),
            Error::Validation { message, .. } => (StatusCode::BAD_REQUEST, message.clone()),
            Error::Serialization(e) => (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)),
            other => {
                tracing::error!(error = %other, "Failed to create session token");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create session".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub(super) async fn create_session_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SessionTokenResponse>, ApiError> {
    let params: SessionParams = if body.iter().all(u8::is_ascii_whitespace) {
        SessionParams::default()
    } else {
        serde_json::from_slice(&body).map_err(Error::from)?
    };
    let token = state.initiator.initiate(&params).await?;
    Ok(Json(SessionTokenResponse {
        session_token: token.into_inner(),
    }))
}

pub(super) async fn list_recipes(State(state): State<Arc<AppState>>) -> Json<Vec<RecipeSummary>> {
    Json(state.initiator.book().summaries())
}

pub(super) async fn get_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let recipe = state.initiator.book().require(&id)?;
    Ok(Json(recipe.clone()))
}

pub(super) async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let params = SessionParams::for_recipe(id).with_prompt_source(PromptSource::Recipe);
    let persona = state.initiator.persona_config(&params)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        persona.system_prompt,
    )
        .into_response())
}

pub(super) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}
