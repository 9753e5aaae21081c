use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::error::Error;
use crate::models::Issue;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/issues", get(list_issues))
        .route("/api/issues/{id}", get(get_issue))
}

/// GET /api/issues - List all issue records, open and closed.
async fn list_issues(State(state): State<AppState>) -> Result<Json<Vec<Issue>>, Error> {
    Ok(Json(state.issues.list().await?))
}

/// GET /api/issues/{id} - Fetch one issue record.
async fn get_issue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Issue>, Error> {
    Ok(Json(state.issues.get(id).await?))
}
