pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validate;

pub use config::Config;
pub use db::{init_pool, run_migrations, today};
pub use error::{Error, InvalidTransition, NotFound, ValidationError};
pub use models::{
    Book, BookStatus, CreateBookRequest, CreateReaderRequest, Issue, IssueBookRequest, IssueStatus,
    Reader, UpdateBookRequest, UpdateReaderRequest,
};
pub use routes::create_router;
pub use service::LoanService;
pub use state::AppState;
pub use store::{BookStore, IssueStore, ReaderStore};
pub use validate::Validator;
