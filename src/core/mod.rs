//! Core business logic abstractions

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod log;
pub mod service;
pub mod source;
pub mod transaction;

// Re-export main types for cleaner imports
pub use aggregate::{BarPoint, LinePoint};
pub use error::{FetchError, FetchErrorKind};
pub use service::TransactionService;
pub use source::TransactionSource;
pub use transaction::{
    DateRange, ExpenseAreaFilter, Transaction, TransactionFilter, TransactionSet,
};
