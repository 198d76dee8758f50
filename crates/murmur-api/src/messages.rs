use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use murmur_types::api::{CreateMessageRequest, UpdateMessageRequest};

use crate::auth::AppState;
use crate::error::ApiError;
use crate::service::blocking;
use crate::service::message_service::validate_message_text;

/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let posted_at = req
        .posted_at
        .unwrap_or_else(|| chrono::Utc::now().timestamp());

    let message = blocking(move || {
        if !state.accounts.account_exists(req.posted_by)? {
            return Err(ApiError::Validation(
                "The account posting this message does not exist".into(),
            ));
        }
        validate_message_text(&req.message_text)?;

        state
            .messages
            .create_message(req.posted_by, &req.message_text, posted_at)
    })
    .await?;

    Ok(Json(message))
}

/// GET /messages
pub async fn get_all_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = blocking(move || state.messages.get_all_messages()).await?;
    Ok(Json(messages))
}

/// GET /messages/{message_id} — an unknown id is a 200 with an empty body.
pub async fn get_message(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(message_id) = path?;

    let message = blocking(move || state.messages.get_message(message_id)).await?;

    Ok(match message {
        Some(message) => Json(message).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// DELETE /messages/{message_id} — deleting an unknown id is a 200 with an
/// empty body, so the call is idempotent from the client's side.
pub async fn delete_message(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(message_id) = path?;

    match blocking(move || state.messages.delete_message(message_id)).await {
        Ok(rows) => Ok(Json(rows).into_response()),
        Err(ApiError::MessageNotFound(id)) => {
            debug!(message_id = id, "Delete of unknown message treated as no-op");
            Ok(StatusCode::OK.into_response())
        }
        Err(e) => Err(e),
    }
}

/// PATCH /messages/{message_id} — an unknown id is a 400.
pub async fn update_message(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(message_id) = path?;
    let Json(req) = payload?;
    validate_message_text(&req.message_text)?;

    let rows =
        blocking(move || state.messages.update_message(message_id, &req.message_text)).await?;

    Ok(Json(rows))
}

/// GET /accounts/{account_id}/messages
pub async fn get_messages_by_account(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(account_id) = path?;

    let messages = blocking(move || state.messages.find_all_by_user(account_id)).await?;
    Ok(Json(messages))
}
