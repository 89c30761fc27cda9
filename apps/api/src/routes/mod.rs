pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::career::handlers as career;
use crate::state::AppState;

/// Upper bound for uploaded résumé documents.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/guest", post(auth::handle_guest))
        .route("/api/v1/auth/logout", post(auth::handle_logout))
        .route("/api/v1/auth/profile", get(auth::handle_profile))
        // Résumé
        .route("/api/v1/resume/text", put(career::handle_resume_text))
        .route(
            "/api/v1/resume/upload",
            post(career::handle_resume_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/resume/analyze", post(career::handle_resume_analyze))
        // Skill gap, jobs, ask
        .route("/api/v1/roles", get(career::handle_list_roles))
        .route("/api/v1/skill-gap", post(career::handle_skill_gap))
        .route("/api/v1/jobs/search", post(career::handle_job_search))
        .route("/api/v1/ask", post(career::handle_ask))
        .with_state(state)
}
