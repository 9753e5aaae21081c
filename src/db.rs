use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use chrono::{NaiveDate, Utc};

/// Current calendar date. Issue and return dates are stamped with this at
/// the moment the transition runs.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Initialize database connection pool with recommended pragmas.
///
/// Foreign keys stay unenforced: the declared references document the links,
/// but closed-loan history must outlive its book or reader (the delete
/// guards live in the loan service).
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(false);

    SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
}

/// Create the schema: books, readers, issues, and the partial unique index
/// that caps open issues at one per book. Every statement is idempotent, so
/// running against an existing compatible database is safe.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(include_str!("../migrations/001_create_books.sql"))
        .execute(pool)
        .await?;
    sqlx::query(include_str!("../migrations/002_create_readers.sql"))
        .execute(pool)
        .await?;
    sqlx::query(include_str!("../migrations/003_create_issues.sql"))
        .execute(pool)
        .await?;
    sqlx::query(include_str!("../migrations/004_create_open_issue_index.sql"))
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test database with in-memory SQLite.
    async fn setup_test_db() -> SqlitePool {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let pool = setup_test_db().await;
        // Running again against the populated schema must not fail.
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_db_check_constraints() {
        let pool = setup_test_db().await;

        // Empty title should fail
        let result = sqlx::query("INSERT INTO books (title, author, year) VALUES (?, ?, ?)")
            .bind("  ")
            .bind("Tolstoy")
            .bind(1869)
            .execute(&pool)
            .await;
        assert!(result.is_err());

        // Negative year should fail
        let result = sqlx::query("INSERT INTO books (title, author, year) VALUES (?, ?, ?)")
            .bind("War and Peace")
            .bind("Tolstoy")
            .bind(-1)
            .execute(&pool)
            .await;
        assert!(result.is_err());

        // Status outside the enum should fail
        let result =
            sqlx::query("INSERT INTO books (title, author, year, status) VALUES (?, ?, ?, ?)")
                .bind("War and Peace")
                .bind("Tolstoy")
                .bind(1869)
                .bind("lost")
                .execute(&pool)
                .await;
        assert!(result.is_err());

        // Duplicate reader email should fail
        sqlx::query("INSERT INTO readers (name, email, phone) VALUES (?, ?, ?)")
            .bind("Ivan Ivanov")
            .bind("ivanov@example.com")
            .bind("1234567")
            .execute(&pool)
            .await
            .unwrap();
        let result = sqlx::query("INSERT INTO readers (name, email, phone) VALUES (?, ?, ?)")
            .bind("Other Ivanov")
            .bind("ivanov@example.com")
            .bind("7654321")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_issue_unique_per_book() {
        let pool = setup_test_db().await;

        sqlx::query(
            "INSERT INTO issues (book_id, reader_id, issue_date, status) VALUES (1, 1, '2026-08-23', 'issued')",
        )
        .execute(&pool)
        .await
        .unwrap();

        // A second open issue for book 1 violates the partial unique index.
        let result = sqlx::query(
            "INSERT INTO issues (book_id, reader_id, issue_date, status) VALUES (1, 2, '2026-08-23', 'issued')",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err());

        // A returned issue for the same book is fine.
        sqlx::query(
            "INSERT INTO issues (book_id, reader_id, issue_date, return_date, status) VALUES (1, 2, '2026-08-01', '2026-08-10', 'returned')",
        )
        .execute(&pool)
        .await
        .unwrap();
    }
}
