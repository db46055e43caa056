//! Author collection service

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::author::{Author, CreateAuthor, UpdateAuthor};
use crate::repository::authors::AuthorsRepository;
use crate::session::SessionStore;

use super::collection::CollectionState;

pub struct AuthorsService {
    repository: AuthorsRepository,
    session: Arc<SessionStore>,
    state: CollectionState<Author>,
}

impl AuthorsService {
    pub fn new(repository: AuthorsRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
            state: CollectionState::default(),
        }
    }

    pub fn state(&self) -> &CollectionState<Author> {
        &self.state
    }

    fn guard(&self) -> AppResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    /// Replace the cached list with the backend's. On failure the cached
    /// items are left untouched and the error is recorded for display.
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

    async fn load_all(&self) -> AppResult<Vec<Author>> {
        self.guard()?;
        self.repository.get_all().await
    }

    pub async fn add(&mut self, author: CreateAuthor) -> AppResult<()> {
        self.state.pending();
        match self.create(&author).await {
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

    async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        self.guard()?;
        self.repository.create(author).await
    }

    pub async fn update(&mut self, id: i32, author: UpdateAuthor) -> AppResult<()> {
        self.state.pending();
        match self.put(id, &author).await {
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

    async fn put(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        self.guard()?;
        self.repository.update(id, author).await
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
