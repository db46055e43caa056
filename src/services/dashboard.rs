//! Dashboard service: summary counts, overdue borrowers and notification
//! dispatch

use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::dashboard::DashboardData;
use crate::repository::dashboard::DashboardRepository;
use crate::session::SessionStore;

/// Notification dispatch lifecycle, separate from the data-loading flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    pub status: NotificationStatus,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub data: DashboardData,
    pub loading: bool,
    pub error: Option<String>,
    pub notification: NotificationState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            data: DashboardData::default(),
            // The dashboard starts empty and is always loaded on entry.
            loading: true,
            error: None,
            notification: NotificationState::default(),
        }
    }
}

pub struct DashboardService {
    repository: DashboardRepository,
    session: Arc<SessionStore>,
    state: DashboardState,
}

impl DashboardService {
    pub fn new(repository: DashboardRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
            state: DashboardState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    fn guard(&self) -> AppResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    /// Load the book summary and the overdue borrowers concurrently into
    /// one snapshot; either failure rejects the whole fetch.
    pub async fn fetch_data(&mut self) -> AppResult<()> {
        self.state.loading = true;
        self.state.error = None;
        match self.load().await {
            Ok(data) => {
                self.state.loading = false;
                self.state.data = data;
                Ok(())
            }
            Err(e) => {
                self.state.loading = false;
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn load(&self) -> AppResult<DashboardData> {
        self.guard()?;
        let (summary, overdue_borrowers) = tokio::join!(
            self.repository.book_summary(),
            self.repository.overdue_borrowers(),
        );
        Ok(DashboardData {
            summary: summary?,
            overdue_borrowers: overdue_borrowers?,
        })
    }

    /// Dispatch overdue emails; `None` notifies every overdue borrower.
    pub async fn send_notifications(
        &mut self,
        transaction_ids: Option<Vec<i32>>,
    ) -> AppResult<()> {
        self.state.notification = NotificationState {
            status: NotificationStatus::Sending,
            message: None,
        };
        match self.dispatch(transaction_ids.as_deref()).await {
            Ok(message) => {
                info!("Overdue notifications dispatched: {}", message);
                self.state.notification = NotificationState {
                    status: NotificationStatus::Success,
                    message: Some(message),
                };
                Ok(())
            }
            Err(e) => {
                self.state.notification = NotificationState {
                    status: NotificationStatus::Error,
                    message: Some(e.to_string()),
                };
                Err(e)
            }
        }
    }

    async fn dispatch(&self, transaction_ids: Option<&[i32]>) -> AppResult<String> {
        self.guard()?;
        let response = self
            .repository
            .send_overdue_notifications(transaction_ids)
            .await?;
        Ok(response.message)
    }

    pub fn clear_notification(&mut self) {
        self.state.notification = NotificationState::default();
    }
}
