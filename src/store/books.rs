use sqlx::SqlitePool;

use crate::error::{Error, NotFound};
use crate::models::{Book, CreateBookRequest, UpdateBookRequest};
use crate::validate::Validator;

/// CRUD persistence for books, owning a handle to the shared pool.
///
/// This layer knows nothing about loans: it will delete a book that is out
/// on loan without complaint. The guarded delete lives on the loan service.
#[derive(Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new book. Nothing is written when validation
    /// fails. Status defaults to `available`.
    pub async fn create(&self, req: &CreateBookRequest) -> Result<Book, Error> {
        Validator::validate_new_book(req)?;
        let status = req.status.unwrap_or_default();

        let result =
            sqlx::query("INSERT INTO books (title, author, year, status) VALUES (?, ?, ?, ?)")
                .bind(&req.title)
                .bind(&req.author)
                .bind(req.year)
                .bind(status)
                .execute(&self.pool)
                .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// All books, in insertion order.
    pub async fn list(&self) -> Result<Vec<Book>, Error> {
        let books =
            sqlx::query_as::<_, Book>("SELECT id, title, author, year, status FROM books ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(books)
    }

    /// Fetch one book by id.
    pub async fn get(&self, id: i64) -> Result<Book, Error> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, year, status FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| NotFound::Book(id).into())
    }

    /// Validate the provided fields, merge them into the existing record,
    /// and persist the result.
    pub async fn update(&self, id: i64, req: &UpdateBookRequest) -> Result<Book, Error> {
        let current = self.get(id).await?;

        if let Some(title) = &req.title {
            Validator::validate_non_empty("title", title)?;
        }
        if let Some(author) = &req.author {
            Validator::validate_non_empty("author", author)?;
        }
        if let Some(year) = req.year {
            Validator::validate_year(year)?;
        }

        sqlx::query("UPDATE books SET title = ?, author = ?, year = ?, status = ? WHERE id = ?")
            .bind(req.title.as_deref().unwrap_or(&current.title))
            .bind(req.author.as_deref().unwrap_or(&current.author))
            .bind(req.year.unwrap_or(current.year))
            .bind(req.status.unwrap_or(current.status))
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.get(id).await
    }

    /// Remove a book, loaned or not. No referential checks happen here.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(NotFound::Book(id).into());
        }
        Ok(())
    }
}
