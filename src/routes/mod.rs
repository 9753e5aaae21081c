pub mod books;
pub mod issues;
pub mod readers;

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(books::routes())
        .merge(readers::routes())
        .merge(issues::routes())
        .route("/health", get(health))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
