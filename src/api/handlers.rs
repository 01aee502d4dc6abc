//! HTTP request handlers

use super::types::{ErrorResponse, MessageRequest, MessageResponse, ReplyDto};
use super::AppState;
use crate::db::SHARED_POOL_EXTERNAL_ID;
use crate::runtime::{EngineError, IncomingMessage};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Incoming chat messages
        .route("/api/messages", post(handle_message))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Messages
// ============================================================

async fn handle_message(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    if req.user_id == SHARED_POOL_EXTERNAL_ID {
        return Err(AppError::BadRequest(format!(
            "user_id {SHARED_POOL_EXTERNAL_ID} is reserved"
        )));
    }
    let message = IncomingMessage::new(req.user_id, req.chat_id, req.text);

    let replies = state.engine.handle_message(message).await.map_err(|e| {
        tracing::error!(user_id = req.user_id, chat_id = req.chat_id, error = %e, "Message handling failed");
        AppError::from(e)
    })?;

    Ok(Json(MessageResponse {
        replies: replies.into_iter().map(ReplyDto::from).collect(),
    }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("vocab-trainer ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
