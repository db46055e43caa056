//! Repository layer: typed facades over the HTTP API

pub mod auth;
pub mod authors;
pub mod books;
pub mod dashboard;
pub mod resource;
pub mod students;
pub mod transactions;

use crate::http::ApiClient;

/// Main repository struct holding one facade per entity
#[derive(Clone)]
pub struct Repository {
    pub auth: auth::AuthRepository,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub students: students::StudentsRepository,
    pub transactions: transactions::TransactionsRepository,
    pub dashboard: dashboard::DashboardRepository,
}

impl Repository {
    /// Create a new repository with the given API client
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: auth::AuthRepository::new(client.clone()),
            authors: authors::AuthorsRepository::new(client.clone()),
            books: books::BooksRepository::new(client.clone()),
            students: students::StudentsRepository::new(client.clone()),
            transactions: transactions::TransactionsRepository::new(client.clone()),
            dashboard: dashboard::DashboardRepository::new(client),
        }
    }
}
