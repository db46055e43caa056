//! Borrow/return transaction model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Identified;

/// Transaction kind as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Borrow,
    Return,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Borrow => write!(f, "borrow"),
            TransactionType::Return => write!(f, "return"),
        }
    }
}

/// Full transaction record as returned by the backend.
///
/// `student`, `user` (the librarian) and `book` are foreign keys; the
/// `*_name` fields and `is_overdue` are denormalized read-only values
/// computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub transaction_id: i32,
    pub student: i32,
    pub user: i32,
    pub book: i32,
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub is_overdue: bool,
    pub borrowed_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub librarian_name: String,
    #[serde(default)]
    pub book_name: String,
}

impl Identified for Transaction {
    fn id(&self) -> i32 {
        self.transaction_id
    }
}

/// Create transaction request.
///
/// Dates travel as `YYYY-MM-DD`; a missing `due_date` is defaulted by the
/// backend to fourteen days after the borrow date.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateTransaction {
    pub student: i32,
    pub user: i32,
    pub book: i32,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrowed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Update transaction request
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}
