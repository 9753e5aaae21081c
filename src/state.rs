use sqlx::SqlitePool;

use crate::service::LoanService;
use crate::store::{BookStore, IssueStore, ReaderStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub books: BookStore,
    pub readers: ReaderStore,
    pub issues: IssueStore,
    pub loans: LoanService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            books: BookStore::new(pool.clone()),
            readers: ReaderStore::new(pool.clone()),
            issues: IssueStore::new(pool.clone()),
            loans: LoanService::new(pool.clone()),
            pool,
        }
    }
}
