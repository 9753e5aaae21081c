use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::Error;
use crate::models::{Book, CreateBookRequest, Issue, IssueBookRequest, UpdateBookRequest};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/books/{id}/issue", post(issue_book))
        .route("/api/books/{id}/return", post(return_book))
}

/// GET /api/books - List all books in insertion order.
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, Error> {
    Ok(Json(state.books.list().await?))
}

/// POST /api/books - Create a book.
async fn create_book(
    State(state): State<AppState>,
    Json(req): Json<CreateBookRequest>,
) -> Result<(StatusCode, Json<Book>), Error> {
    let book = state.books.create(&req).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/books/{id} - Fetch one book.
async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, Error> {
    Ok(Json(state.books.get(id).await?))
}

/// PUT /api/books/{id} - Update the provided fields of a book.
async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<Book>, Error> {
    Ok(Json(state.books.update(id, &req).await?))
}

/// DELETE /api/books/{id} - Delete a book. Refused while it is on loan.
async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Error> {
    state.loans.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/books/{id}/issue - Issue the book to a reader.
async fn issue_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<IssueBookRequest>,
) -> Result<(StatusCode, Json<Issue>), Error> {
    let issue = state.loans.issue_book(id, req.reader_id).await?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// POST /api/books/{id}/return - Return the book, closing its open issue.
async fn return_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Issue>, Error> {
    Ok(Json(state.loans.return_book(id).await?))
}
