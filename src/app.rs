use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/mount", post(handlers::mount))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/activities", post(handlers::set_activity))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
