//! State services: per-entity mirrors of the remote collections

pub mod auth;
pub mod authors;
pub mod books;
pub mod collection;
pub mod dashboard;
pub mod students;
pub mod transactions;

use std::sync::Arc;

use crate::repository::Repository;
use crate::session::SessionStore;

/// Container for all services
pub struct Services {
    pub auth: auth::AuthService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub students: students::StudentsService,
    pub transactions: transactions::TransactionsService,
    pub dashboard: dashboard::DashboardService,
}

impl Services {
    /// Create all services sharing one repository and one session handle
    pub fn new(repository: Repository, session: Arc<SessionStore>) -> Self {
        Self {
            auth: auth::AuthService::new(repository.auth.clone(), session.clone()),
            authors: authors::AuthorsService::new(repository.authors.clone(), session.clone()),
            books: books::BooksService::new(repository.books.clone(), session.clone()),
            students: students::StudentsService::new(repository.students.clone(), session.clone()),
            transactions: transactions::TransactionsService::new(
                repository.transactions.clone(),
                session.clone(),
            ),
            dashboard: dashboard::DashboardService::new(repository.dashboard, session),
        }
    }
}
