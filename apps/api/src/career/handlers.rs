//! Axum route handlers for the career features. All routes need a session.

use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::sessions::{CurrentSession, Session};
use crate::career::pipeline::{Advisory, JobSearchOutcome, RoleSource, SkillGapOutcome};
use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentFormat};
use crate::skills::{CandidateProfile, SkillSet};
use crate::state::AppState;

/// Multipart field carrying the résumé document.
const UPLOAD_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub skills: SkillSet,
    pub skill_count: usize,
}

impl From<CandidateProfile> for ResumeResponse {
    fn from(profile: CandidateProfile) -> Self {
        Self {
            skill_count: profile.skills.len(),
            skills: profile.skills,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub roles: Vec<String>,
    pub default_mode: RoleSource,
}

#[derive(Debug, Deserialize)]
pub struct SkillGapRequest {
    pub role: String,
    #[serde(default)]
    pub mode: Option<RoleSource>,
}

#[derive(Debug, Deserialize)]
pub struct JobSearchRequest {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/resume/text
///
/// Replaces the session's résumé with pasted text.
pub async fn handle_resume_text(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<ResumeTextRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    store_resume(&state, &session, request.text)
}

/// POST /api/v1/resume/upload
///
/// Multipart upload of a PDF or DOCX résumé in field `file`.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    mut multipart: Multipart,
) -> Result<Json<ResumeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let format = DocumentFormat::from_filename(&filename)?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;

        info!("Extracting {:?} résumé ({} bytes)", format, bytes.len());
        let text = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
            .await
            .map_err(|e| AppError::Internal(anyhow!("extraction task failed: {e}")))??;

        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "No text could be found in the uploaded document".to_string(),
            ));
        }
        return store_resume(&state, &session, text);
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// POST /api/v1/resume/analyze
pub async fn handle_resume_analyze(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Advisory>, AppError> {
    let resume = require_resume(&session)?;
    Ok(Json(state.pipeline.review_resume(resume).await))
}

/// GET /api/v1/roles
pub async fn handle_list_roles(
    State(state): State<AppState>,
    CurrentSession(_): CurrentSession,
) -> Json<RolesResponse> {
    Json(RolesResponse {
        roles: state.pipeline.roles(),
        default_mode: state.pipeline.role_source(),
    })
}

/// POST /api/v1/skill-gap
///
/// Table mode returns a `GapReport`; free-text mode returns model advice.
/// An unknown role on the table path is a 404 suggesting free-text mode.
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<SkillGapRequest>,
) -> Result<Json<SkillGapOutcome>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }
    let resume = require_resume(&session)?;

    let outcome = state
        .pipeline
        .skill_gap(resume, &session.profile, &request.role, request.mode)
        .await?;
    Ok(Json(outcome))
}

/// POST /api/v1/jobs/search
///
/// Without a résumé the profile is empty and so are the results.
pub async fn handle_job_search(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<JobSearchRequest>,
) -> Json<JobSearchOutcome> {
    let location = request.location.as_deref().unwrap_or_default();
    Json(
        state
            .pipeline
            .search_jobs(&session.profile, &request.query, location)
            .await,
    )
}

/// POST /api/v1/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    CurrentSession(_): CurrentSession,
    Json(request): Json<AskRequest>,
) -> Result<Json<Advisory>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }
    Ok(Json(state.pipeline.ask(&request.question).await))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn store_resume(
    state: &AppState,
    session: &Session,
    text: String,
) -> Result<Json<ResumeResponse>, AppError> {
    let profile = state
        .sessions
        .replace_resume(session.id, text)
        .ok_or(AppError::Unauthorized)?;
    info!(
        "Session {} résumé replaced: {} skills",
        session.id,
        profile.skills.len()
    );
    Ok(Json(profile.into()))
}

fn require_resume(session: &Session) -> Result<&str, AppError> {
    session.resume().ok_or_else(|| {
        AppError::Validation(
            "No résumé on file. Upload one or paste its text first.".to_string(),
        )
    })
}
