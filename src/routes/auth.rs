//! Auth API endpoints.

use crate::auth::credentials;
use crate::auth::middleware::AppState;
use crate::auth::token::issue_token;
use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::storage;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use zeroize::Zeroizing;

/// One message for both unknown username and wrong password, so responses
/// cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// POST /register — Create an account
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let RegisterRequest { username, password } = req;

    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    // bcrypt is CPU-bound for ~100ms; keep it off the request workers
    let password = Zeroizing::new(password);
    let password_hash = tokio::task::spawn_blocking(move || credentials::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

    let account = storage::account::insert_account(&state.db, &username, &password_hash).await?;

    tracing::info!(
        action = "account_registered",
        account_id = account.id,
        username = %account.username,
        "New account registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: account.id,
            username: account.username,
        }),
    ))
}

/// POST /login — Verify credentials and issue a session token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let LoginRequest { username, password } = req;

    let account = match storage::account::get_by_username(&state.db, &username).await? {
        Some(account) => account,
        None => {
            tracing::warn!(action = "auth_failed", username = %username, "Unknown username");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }
    };

    let password = Zeroizing::new(password);
    let stored_hash = account.password.clone();
    let valid =
        tokio::task::spawn_blocking(move || credentials::verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

    if !valid {
        tracing::warn!(action = "auth_failed", username = %username, "Wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = issue_token(
        account.id,
        &account.username,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )
    .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))?;

    tracing::info!(
        action = "auth_success",
        account_id = account.id,
        username = %account.username,
        "User authenticated"
    );

    Ok(Json(LoginResponse {
        token,
        msg: "Authentication successful".to_string(),
    }))
}
