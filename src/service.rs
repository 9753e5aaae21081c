use sqlx::SqlitePool;

use crate::db::today;
use crate::error::{Error, InvalidTransition, NotFound};
use crate::models::{Book, BookStatus, Issue, IssueStatus};

/// The loan lifecycle: the issue and return transitions, plus the deletes
/// that must respect open loans.
///
/// Both transitions run as one transaction whose first statement is a
/// write, so concurrent calls on the same book serialize on SQLite's write
/// lock and the loser observes committed state rather than a stale
/// snapshot. No intermediate state (book marked issued without an open
/// issue, or the reverse) is ever visible to other connections.
#[derive(Clone)]
pub struct LoanService {
    pool: SqlitePool,
}

impl LoanService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Issue a book to a reader: create the issue record and mark the book
    /// `issued`, atomically. Fails without side effects if the book or
    /// reader is missing or the book is not available.
    pub async fn issue_book(&self, book_id: i64, reader_id: i64) -> Result<Issue, Error> {
        // Pre-checks in contract order: book, reader, availability. The
        // availability check is repeated as part of the claim below; this
        // pass only decides which error the unraced caller sees.
        let book = self
            .fetch_book(book_id)
            .await?
            .ok_or(NotFound::Book(book_id))?;
        self.ensure_reader_exists(reader_id).await?;
        if book.status != BookStatus::Available {
            return Err(InvalidTransition::BookNotAvailable(book_id, book.status).into());
        }

        let mut tx = self.pool.begin().await?;

        // Claim the book. The status condition makes this a compare-and-
        // swap: of two racing claims exactly one updates a row.
        let claimed = sqlx::query("UPDATE books SET status = ? WHERE id = ? AND status = ?")
            .bind(BookStatus::Issued)
            .bind(book_id)
            .bind(BookStatus::Available)
            .execute(&mut *tx)
            .await?;

        if claimed.rows_affected() == 0 {
            // Lost a race since the pre-check: the book changed or vanished.
            let status =
                sqlx::query_scalar::<_, BookStatus>("SELECT status FROM books WHERE id = ?")
                    .bind(book_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match status {
                None => NotFound::Book(book_id).into(),
                Some(status) => InvalidTransition::BookNotAvailable(book_id, status).into(),
            });
        }

        let issue = sqlx::query_as::<_, Issue>(
            "INSERT INTO issues (book_id, reader_id, issue_date, status) VALUES (?, ?, ?, ?) \
             RETURNING id, book_id, reader_id, issue_date, return_date, status",
        )
        .bind(book_id)
        .bind(reader_id)
        .bind(today())
        .bind(IssueStatus::Issued)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(book_id, reader_id, issue_id = issue.id, "book issued");
        Ok(issue)
    }

    /// Return a book: close its open issue and mark the book `available`,
    /// atomically. Fails if the book has no open issue.
    pub async fn return_book(&self, book_id: i64) -> Result<Issue, Error> {
        let mut tx = self.pool.begin().await?;

        // Close the open issue (there is at most one, by the partial unique
        // index). Write-first for the same reason as in issue_book;
        // RETURNING hands back the row the update hit.
        let issue = sqlx::query_as::<_, Issue>(
            "UPDATE issues SET status = ?, return_date = ? \
             WHERE book_id = ? AND status = ? \
             RETURNING id, book_id, reader_id, issue_date, return_date, status",
        )
        .bind(IssueStatus::Returned)
        .bind(today())
        .bind(book_id)
        .bind(IssueStatus::Issued)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(NotFound::ActiveIssue(book_id))?;

        sqlx::query("UPDATE books SET status = ? WHERE id = ?")
            .bind(BookStatus::Available)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(book_id, issue_id = issue.id, "book returned");
        Ok(issue)
    }

    /// Delete a book unless it is out on loan. Closed (returned) issues do
    /// not block deletion and are kept as history.
    pub async fn delete_book(&self, book_id: i64) -> Result<(), Error> {
        // Guard and delete in one statement, so no open issue can appear
        // between the check and the write.
        let result = sqlx::query(
            "DELETE FROM books WHERE id = ? AND NOT EXISTS \
             (SELECT 1 FROM issues WHERE issues.book_id = books.id AND issues.status = ?)",
        )
        .bind(book_id)
        .bind(IssueStatus::Issued)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(match self.fetch_book(book_id).await? {
                None => NotFound::Book(book_id).into(),
                Some(_) => InvalidTransition::BookOnLoan(book_id).into(),
            });
        }
        Ok(())
    }

    /// Delete a reader unless they hold an open loan.
    pub async fn delete_reader(&self, reader_id: i64) -> Result<(), Error> {
        let result = sqlx::query(
            "DELETE FROM readers WHERE id = ? AND NOT EXISTS \
             (SELECT 1 FROM issues WHERE issues.reader_id = readers.id AND issues.status = ?)",
        )
        .bind(reader_id)
        .bind(IssueStatus::Issued)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM readers WHERE id = ?")
                .bind(reader_id)
                .fetch_optional(&self.pool)
                .await?;
            return Err(match exists {
                None => NotFound::Reader(reader_id).into(),
                Some(_) => InvalidTransition::ReaderOnLoan(reader_id).into(),
            });
        }
        Ok(())
    }

    async fn fetch_book(&self, id: i64) -> Result<Option<Book>, sqlx::Error> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, year, status FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn ensure_reader_exists(&self, id: i64) -> Result<(), Error> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM readers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(NotFound::Reader(id).into());
        }
        Ok(())
    }
}
