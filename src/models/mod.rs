//! Data models mirroring the LMS backend wire shapes

pub mod author;
pub mod book;
pub mod dashboard;
pub mod student;
pub mod transaction;
pub mod user;

// Re-export commonly used types
pub use author::{Author, CreateAuthor, UpdateAuthor};
pub use book::{Book, CreateBook, UpdateBook};
pub use dashboard::{BookSummary, DashboardData, NotificationResponse, OverdueBorrower};
pub use student::{CreateStudent, Student, UpdateStudent};
pub use transaction::{CreateTransaction, Transaction, TransactionType, UpdateTransaction};
pub use user::{LoginRequest, LoginResponse};

/// Records identified by a backend-assigned numeric id.
///
/// Ids are never generated client-side; a record carrying one was returned
/// by the backend for its entity type.
pub trait Identified {
    fn id(&self) -> i32;
}
