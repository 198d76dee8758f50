use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use murmur_db::Database;
use murmur_types::api::CredentialsRequest;

use crate::error::ApiError;
use crate::service::{AccountService, MessageService, blocking};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            accounts: AccountService::new(db.clone()),
            messages: MessageService::new(db),
        }
    }
}

fn require_credentials(req: &CredentialsRequest) -> Result<(), ApiError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password must not be empty".into(),
        ));
    }
    Ok(())
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    require_credentials(&req)?;

    let accounts = state.accounts.clone();
    let account =
        blocking(move || accounts.create_account(&req.username, &req.password)).await?;

    Ok(Json(account))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    require_credentials(&req)?;

    let accounts = state.accounts.clone();
    let account = blocking(move || accounts.login(&req.username, &req.password))
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(account))
}
