//! Dashboard summary and overdue-notification types

use serde::{Deserialize, Serialize};

/// Aggregate counts from `GET /api/book-summary/`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    pub total_borrowed_books: i64,
    pub total_returned_books: i64,
    pub total_books: i64,
    pub total_students: i64,
}

/// One overdue borrower, projected from the backend's overdue transaction
/// list. The backend returns full transactions; only these two fields are
/// of interest to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverdueBorrower {
    pub transaction_id: i32,
    pub student_name: String,
}

/// Response of `POST /api/overdue-emails/`
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationResponse {
    pub message: String,
}

/// Everything the dashboard view renders in one snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub summary: BookSummary,
    pub overdue_borrowers: Vec<OverdueBorrower>,
}
