use sqlx::SqlitePool;

use crate::error::{Error, NotFound};
use crate::models::Issue;

/// Read access to loan records.
///
/// Issues are created by the issue transition and mutated by the return
/// transition only, so this store exposes no direct writes.
#[derive(Clone)]
pub struct IssueStore {
    pool: SqlitePool,
}

impl IssueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All issues, in insertion order.
    pub async fn list(&self) -> Result<Vec<Issue>, Error> {
        let issues = sqlx::query_as::<_, Issue>(
            "SELECT id, book_id, reader_id, issue_date, return_date, status \
             FROM issues ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(issues)
    }

    /// Fetch one issue by id.
    pub async fn get(&self, id: i64) -> Result<Issue, Error> {
        sqlx::query_as::<_, Issue>(
            "SELECT id, book_id, reader_id, issue_date, return_date, status \
             FROM issues WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| NotFound::Issue(id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_pool, run_migrations};
    use crate::models::IssueStatus;
    use chrono::NaiveDate;

    async fn setup_store() -> IssueStore {
        let pool = init_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();

        sqlx::query(
            "INSERT INTO issues (book_id, reader_id, issue_date, return_date, status) \
             VALUES (1, 1, '2026-08-01', '2026-08-10', 'returned'), \
                    (2, 1, '2026-08-20', NULL, 'issued')",
        )
        .execute(&pool)
        .await
        .unwrap();

        IssueStore::new(pool)
    }

    #[tokio::test]
    async fn test_list() {
        let store = setup_store().await;

        let issues = store.list().await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].status, IssueStatus::Returned);
        assert_eq!(
            issues[0].return_date,
            Some(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap())
        );
        assert_eq!(issues[1].status, IssueStatus::Issued);
        assert_eq!(issues[1].return_date, None);
    }

    #[tokio::test]
    async fn test_get() {
        let store = setup_store().await;

        let issue = store.get(2).await.unwrap();
        assert_eq!(issue.book_id, 2);
        assert_eq!(
            issue.issue_date,
            NaiveDate::from_ymd_opt(2026, 8, 20).unwrap()
        );

        let err = store.get(99).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(NotFound::Issue(99))));
    }
}
