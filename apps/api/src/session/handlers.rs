//! Axum route handlers for the chat session API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conversation::Turn;
use crate::errors::AppError;
use crate::session::turn::{run_turn, TurnOutcome};
use crate::session::{SessionContext, SessionSettings};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub settings: SessionSettings,
    pub transcript: Vec<Turn>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub enabled_tools: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

async fn find(state: &AppState, id: Uuid) -> Result<Arc<SessionContext>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

async fn view(session: &SessionContext) -> SessionView {
    SessionView {
        session_id: session.id,
        created_at: session.created_at,
        settings: session.settings().await,
        transcript: session.transcript().await,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let settings = SessionSettings::with_model(state.config.default_model.clone());
    let session = state.sessions.create(settings).await;
    (StatusCode::CREATED, Json(view(&session).await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find(&state, id).await?;
    Ok(Json(view(&session).await))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_destroy_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.destroy(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// PATCH /api/v1/sessions/:id/settings
///
/// Takes effect on the next submitted message, never on one in flight.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<SessionSettings>, AppError> {
    let session = find(&state, id).await?;

    let settings = session
        .update_settings(|settings| {
            if let Some(model) = req.model {
                settings.model.model = model.trim().to_string();
            }
            if let Some(temperature) = req.temperature {
                settings.model.temperature = temperature;
            }
            if let Some(enabled_tools) = req.enabled_tools {
                settings.enabled_tools = enabled_tools;
            }
        })
        .await
        .map_err(AppError::Validation)?;

    tracing::info!(session_id = %id, ?settings, "Session settings updated");
    Ok(Json(settings))
}

/// POST /api/v1/sessions/:id/messages
///
/// Blocks until the agent answers. Agent failures come back as a 200 with
/// `failed: true` and a diagnostic reply.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<TurnOutcome>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let session = find(&state, id).await?;
    let outcome = run_turn(
        &session,
        state.models.as_ref(),
        state.config.agent,
        &req.content,
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/clear
///
/// Empties transcript and memory together; returns the fresh view for a full re-render.
pub async fn handle_clear(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = find(&state, id).await?;
    {
        let mut conversation = session.try_conversation().ok_or_else(|| {
            AppError::Conflict("Cannot clear while a message is being processed".to_string())
        })?;
        conversation.clear();
    }
    tracing::info!(session_id = %id, "Conversation cleared");
    Ok(Json(view(&session).await))
}
