use std::sync::Arc;

use crate::auth::sessions::SessionStore;
use crate::auth::store::UserStore;
use crate::career::pipeline::CareerPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable user store. Postgres when DATABASE_URL is set, in-memory otherwise.
    pub users: Arc<dyn UserStore>,
    /// Live sessions, keyed by session id. Process-local.
    pub sessions: Arc<SessionStore>,
    /// Role table, generative adapter and listing source, wired once at startup.
    pub pipeline: Arc<CareerPipeline>,
}
