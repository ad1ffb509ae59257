//! Session Routes
//!
//! Explore sessions hold one user's dropdown choices, point selection and
//! charts. Input changes are applied through the explore controller.
//!
//! - POST /api/v1/sessions - Create a session
//! - GET /api/v1/sessions/:id - Get the full explore view
//! - POST /api/v1/sessions/:id/inputs - Apply an input change
//! - DELETE /api/v1/sessions/:id - Close a session

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CreateSessionRequest, SessionResponse, UpdateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::explore::InputChange;

/// POST /api/v1/sessions
///
/// Start a session on the requested (or first) dataset. The body is
/// optional; an empty body starts on the first dataset.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let req: CreateSessionRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::Validation(format!("Invalid session request: {}", e)))?
    };

    let explore = state.controller.initial_state(req.dataset.as_deref())?;
    let session = state.sessions.create(explore).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::new(&session, dataset_names(&state))),
    ))
}

/// GET /api/v1/sessions/:id
///
/// Full explore view of a session.
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionResponse>> {
    let datasets = dataset_names(&state);
    let response = state
        .sessions
        .with_session(&id, |session| SessionResponse::new(session, datasets))
        .await?;
    Ok(Json(response))
}

/// POST /api/v1/sessions/:id/inputs
///
/// Apply one dropdown or selection change and return the recomputed outputs.
pub async fn apply_input(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(change): ApiJson<InputChange>,
) -> ApiResult<Json<UpdateResponse>> {
    let controller = Arc::clone(&state.controller);
    let response = state
        .sessions
        .with_session(&id, |session| {
            let update = controller.apply(&mut session.state, change)?;
            Ok::<_, ApiError>(UpdateResponse::new(&session.id, update, &session.state))
        })
        .await??;

    tracing::debug!(
        session_id = %id,
        recomputed = response.recomputed.len(),
        "Input applied"
    );
    Ok(Json(response))
}

/// DELETE /api/v1/sessions/:id
///
/// Close a session.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Session {} not found", id)))
    }
}

fn dataset_names(state: &AppState) -> Vec<String> {
    state.registry.names().map(str::to_string).collect()
}
