//! Axum route handlers for registration, login, guest entry, logout and profile.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::sessions::{CurrentSession, Session, GUEST_USERNAME};
use crate::errors::AppError;
use crate::models::user::{UserProfile, UserRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub username: String,
    pub is_guest: bool,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.id,
            username: session.username,
            is_guest: session.is_guest,
        }
    }
}

/// POST /api/v1/auth/register
///
/// Creates the account but does not log in; the client follows up with `/login`.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }
    if username.eq_ignore_ascii_case(GUEST_USERNAME) {
        return Err(AppError::Validation(format!(
            "'{GUEST_USERNAME}' is reserved"
        )));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("password cannot be empty".to_string()));
    }
    if req.password != req.confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if state.users.get(username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "username '{username}' is already registered"
        )));
    }

    state
        .users
        .put(UserRecord {
            username: username.to_string(),
            full_name: req.full_name.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash: hash_password(&req.password),
            created_at: Utc::now(),
        })
        .await?;

    info!("Registered user '{username}'");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: username.to_string(),
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let username = req.username.trim();
    let user = state
        .users
        .get(username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let session = state.sessions.create(&user.username, false);
    info!(
        "Session {} opened for '{}' ({} active)",
        session.id,
        session.username,
        state.sessions.len()
    );
    Ok(Json(session.into()))
}

/// POST /api/v1/auth/guest
pub async fn handle_guest(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.sessions.create(GUEST_USERNAME, true);
    info!("Guest session {} opened", session.id);
    Json(session.into())
}

/// POST /api/v1/auth/logout
///
/// Discards the session together with its résumé and profile.
pub async fn handle_logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> StatusCode {
    state.sessions.remove(session.id);
    info!("Session {} closed", session.id);
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/profile
///
/// Guests, and users with no stored record, get empty name and email.
pub async fn handle_profile(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<UserProfile>, AppError> {
    if session.is_guest {
        return Ok(Json(UserProfile {
            username: session.username,
            ..UserProfile::default()
        }));
    }

    let profile = state
        .users
        .get(&session.username)
        .await?
        .map(|user| UserProfile::from(&user))
        .unwrap_or_else(|| UserProfile {
            username: session.username.clone(),
            ..UserProfile::default()
        });

    Ok(Json(profile))
}
