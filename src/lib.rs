//! LMS Admin Console
//!
//! A Rust client for the LMS library-management backend: librarians
//! authenticate, manage authors, books, students and borrow/return
//! transactions, and review a summary dashboard with overdue-borrower
//! notifications. All data is owned by the backend and accessed over HTTP;
//! this crate keeps typed in-memory mirrors and a durable session.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state for one console session
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<session::SessionStore>,
    pub services: services::Services,
}

impl AppState {
    /// Wire session storage, HTTP client, repositories and services from
    /// the given configuration.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let config = Arc::new(config);
        let session = Arc::new(session::SessionStore::from_config(&config.session));
        let client = http::ApiClient::new(&config.api, session.clone())?;
        let repository = repository::Repository::new(client);
        let services = services::Services::new(repository, session.clone());

        Ok(Self {
            config,
            session,
            services,
        })
    }
}
