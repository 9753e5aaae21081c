use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::Error;
use crate::models::{CreateReaderRequest, Reader, UpdateReaderRequest};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/readers", get(list_readers).post(create_reader))
        .route(
            "/api/readers/{id}",
            get(get_reader).put(update_reader).delete(delete_reader),
        )
}

/// GET /api/readers - List all readers in insertion order.
async fn list_readers(State(state): State<AppState>) -> Result<Json<Vec<Reader>>, Error> {
    Ok(Json(state.readers.list().await?))
}

/// POST /api/readers - Register a reader.
async fn create_reader(
    State(state): State<AppState>,
    Json(req): Json<CreateReaderRequest>,
) -> Result<(StatusCode, Json<Reader>), Error> {
    let reader = state.readers.create(&req).await?;
    Ok((StatusCode::CREATED, Json(reader)))
}

/// GET /api/readers/{id} - Fetch one reader.
async fn get_reader(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Reader>, Error> {
    Ok(Json(state.readers.get(id).await?))
}

/// PUT /api/readers/{id} - Update the provided fields of a reader.
async fn update_reader(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateReaderRequest>,
) -> Result<Json<Reader>, Error> {
    Ok(Json(state.readers.update(id, &req).await?))
}

/// DELETE /api/readers/{id} - Delete a reader. Refused while they hold a loan.
async fn delete_reader(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Error> {
    state.loans.delete_reader(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
