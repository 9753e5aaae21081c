use sqlx::SqlitePool;

use crate::error::{Error, NotFound, ValidationError};
use crate::models::{CreateReaderRequest, Reader, UpdateReaderRequest};
use crate::validate::Validator;

/// CRUD persistence for readers. Email uniqueness is enforced by the UNIQUE
/// column and surfaced as a validation conflict.
#[derive(Clone)]
pub struct ReaderStore {
    pool: SqlitePool,
}

impl ReaderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and persist a new reader. Nothing is written when
    /// validation fails or the email is already registered.
    pub async fn create(&self, req: &CreateReaderRequest) -> Result<Reader, Error> {
        Validator::validate_new_reader(req)?;

        let result = sqlx::query("INSERT INTO readers (name, email, phone) VALUES (?, ?, ?)")
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| email_conflict(e, &req.email))?;

        self.get(result.last_insert_rowid()).await
    }

    /// All readers, in insertion order.
    pub async fn list(&self) -> Result<Vec<Reader>, Error> {
        let readers =
            sqlx::query_as::<_, Reader>("SELECT id, name, email, phone FROM readers ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(readers)
    }

    /// Fetch one reader by id.
    pub async fn get(&self, id: i64) -> Result<Reader, Error> {
        sqlx::query_as::<_, Reader>("SELECT id, name, email, phone FROM readers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| NotFound::Reader(id).into())
    }

    /// Validate the provided fields, merge them into the existing record,
    /// and persist the result.
    pub async fn update(&self, id: i64, req: &UpdateReaderRequest) -> Result<Reader, Error> {
        let current = self.get(id).await?;

        if let Some(name) = &req.name {
            Validator::validate_non_empty("name", name)?;
        }
        if let Some(email) = &req.email {
            Validator::validate_email(email)?;
        }
        if let Some(phone) = &req.phone {
            Validator::validate_phone(phone)?;
        }

        let email = req.email.as_deref().unwrap_or(&current.email);
        sqlx::query("UPDATE readers SET name = ?, email = ?, phone = ? WHERE id = ?")
            .bind(req.name.as_deref().unwrap_or(&current.name))
            .bind(email)
            .bind(req.phone.as_deref().unwrap_or(&current.phone))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| email_conflict(e, email))?;

        self.get(id).await
    }

    /// Remove a reader. No referential checks happen here.
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM readers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(NotFound::Reader(id).into());
        }
        Ok(())
    }
}

/// Translate a UNIQUE violation on readers.email into the validation
/// conflict the caller expects; pass everything else through.
fn email_conflict(err: sqlx::Error, email: &str) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation => {
            ValidationError::EmailTaken(email.to_string()).into()
        }
        _ => err.into(),
    }
}
