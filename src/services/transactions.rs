//! Borrow/return transaction collection service

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::transaction::{CreateTransaction, Transaction, UpdateTransaction};
use crate::repository::transactions::TransactionsRepository;
use crate::session::SessionStore;

use super::collection::CollectionState;

pub struct TransactionsService {
    repository: TransactionsRepository,
    session: Arc<SessionStore>,
    state: CollectionState<Transaction>,
}

impl TransactionsService {
    pub fn new(repository: TransactionsRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
            state: CollectionState::default(),
        }
    }

    pub fn state(&self) -> &CollectionState<Transaction> {
        &self.state
    }

    fn guard(&self) -> AppResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    pub async fn fetch_all(&mut self) -> AppResult<()> {
        self.state.pending();
        match self.load_all().await {
            Ok(items) => {
                self.state.fulfilled_replace(items);
                Ok(())
            }
            Err(e) => {
                self.state.rejected(e.to_string());
                Err(e)
            }
        }
    }

    async fn load_all(&self) -> AppResult<Vec<Transaction>> {
        self.guard()?;
        self.repository.get_all().await
    }

    /// Record a borrow or a return. The backend fills in the denormalized
    /// names and, for a missing due date, the fourteen-day default.
    pub async fn add(&mut self, transaction: CreateTransaction) -> AppResult<()> {
        self.state.pending();
        match self.create(&transaction).await {
            Ok(created) => {
                self.state.fulfilled_append(created);
                Ok(())
            }
            Err(e) => {
                self.state.rejected(e.to_string());
                Err(e)
            }
        }
    }

    async fn create(&self, transaction: &CreateTransaction) -> AppResult<Transaction> {
        self.guard()?;
        self.repository.create(transaction).await
    }

    pub async fn update(&mut self, id: i32, transaction: UpdateTransaction) -> AppResult<()> {
        self.state.pending();
        match self.put(id, &transaction).await {
            Ok(updated) => {
                self.state.fulfilled_update(updated);
                Ok(())
            }
            Err(e) => {
                self.state.rejected(e.to_string());
                Err(e)
            }
        }
    }

    async fn put(&self, id: i32, transaction: &UpdateTransaction) -> AppResult<Transaction> {
        self.guard()?;
        self.repository.update(id, transaction).await
    }

    pub async fn delete(&mut self, id: i32) -> AppResult<()> {
        self.state.pending();
        match self.remove(id).await {
            Ok(()) => {
                self.state.fulfilled_delete(id);
                Ok(())
            }
            Err(e) => {
                self.state.rejected(e.to_string());
                Err(e)
            }
        }
    }

    async fn remove(&self, id: i32) -> AppResult<()> {
        self.guard()?;
        self.repository.delete(id).await
    }
}
