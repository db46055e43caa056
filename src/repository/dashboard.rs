//! Dashboard repository: aggregate counts and overdue-borrower emails

use serde_json::json;

use super::resource::Resource;
use crate::error::AppResult;
use crate::http::ApiClient;
use crate::models::dashboard::{BookSummary, NotificationResponse, OverdueBorrower};

#[derive(Clone)]
pub struct DashboardRepository {
    resource: Resource<OverdueBorrower>,
}

impl DashboardRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api"),
        }
    }

    pub async fn book_summary(&self) -> AppResult<BookSummary> {
        self.resource.get("/book-summary/").await
    }

    /// The backend returns full overdue transactions; only the transaction
    /// id and the student name survive the projection.
    pub async fn overdue_borrowers(&self) -> AppResult<Vec<OverdueBorrower>> {
        self.resource.get("/overdue-emails/").await
    }

    /// Trigger notification dispatch. `None` notifies every overdue
    /// borrower; an explicit id list restricts the dispatch to those
    /// transactions.
    pub async fn send_overdue_notifications(
        &self,
        transaction_ids: Option<&[i32]>,
    ) -> AppResult<NotificationResponse> {
        let body = transaction_ids.map(|ids| {
            json!({
                "send_to_all": false,
                "transaction_ids": ids,
            })
        });
        self.resource.post("/overdue-emails/", body).await
    }
}
