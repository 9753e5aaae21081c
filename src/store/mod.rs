//! Per-entity persistence over the shared SQLite pool.

pub mod books;
pub mod issues;
pub mod readers;

pub use books::BookStore;
pub use issues::IssueStore;
pub use readers::ReaderStore;
