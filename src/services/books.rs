//! Book collection service

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::book::{Book, CreateBook, UpdateBook};
use crate::repository::books::BooksRepository;
use crate::session::SessionStore;

use super::collection::CollectionState;

pub struct BooksService {
    repository: BooksRepository,
    session: Arc<SessionStore>,
    state: CollectionState<Book>,
}

impl BooksService {
    pub fn new(repository: BooksRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
            state: CollectionState::default(),
        }
    }

    pub fn state(&self) -> &CollectionState<Book> {
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

    async fn load_all(&self) -> AppResult<Vec<Book>> {
        self.guard()?;
        self.repository.get_all().await
    }

    pub async fn add(&mut self, book: CreateBook) -> AppResult<()> {
        self.state.pending();
        match self.create(&book).await {
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

    async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        self.guard()?;
        self.repository.create(book).await
    }

    pub async fn update(&mut self, id: i32, book: UpdateBook) -> AppResult<()> {
        self.state.pending();
        match self.put(id, &book).await {
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

    async fn put(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        self.guard()?;
        self.repository.update(id, book).await
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
