//! Borrow/return transactions repository

use super::resource::Resource;
use crate::error::AppResult;
use crate::http::{json_body, ApiClient};
use crate::models::transaction::{CreateTransaction, Transaction, UpdateTransaction};

#[derive(Clone)]
pub struct TransactionsRepository {
    resource: Resource<Transaction>,
}

impl TransactionsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/transactions"),
        }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Transaction>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Transaction> {
        self.resource.get_by_id(id).await
    }

    pub async fn create(&self, transaction: &CreateTransaction) -> AppResult<Transaction> {
        self.resource.post("/", Some(json_body(transaction)?)).await
    }

    /// Partial update; all fields of [`UpdateTransaction`] are optional, so
    /// this goes out as a PATCH.
    pub async fn update(&self, id: i32, transaction: &UpdateTransaction) -> AppResult<Transaction> {
        self.resource
            .patch(&format!("/{}/", id), Some(json_body(transaction)?))
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.resource.delete(&format!("/{}/", id)).await
    }
}
