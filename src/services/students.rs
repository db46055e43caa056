//! Student collection service

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::student::{CreateStudent, Student, UpdateStudent};
use crate::repository::students::StudentsRepository;
use crate::session::SessionStore;

use super::collection::CollectionState;

pub struct StudentsService {
    repository: StudentsRepository,
    session: Arc<SessionStore>,
    state: CollectionState<Student>,
}

impl StudentsService {
    pub fn new(repository: StudentsRepository, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
            state: CollectionState::default(),
        }
    }

    pub fn state(&self) -> &CollectionState<Student> {
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

    async fn load_all(&self) -> AppResult<Vec<Student>> {
        self.guard()?;
        self.repository.get_all().await
    }

    pub async fn add(&mut self, student: CreateStudent) -> AppResult<()> {
        self.state.pending();
        match self.create(&student).await {
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

    async fn create(&self, student: &CreateStudent) -> AppResult<Student> {
        self.guard()?;
        self.repository.create(student).await
    }

    pub async fn update(&mut self, id: i32, student: UpdateStudent) -> AppResult<()> {
        self.state.pending();
        match self.put(id, &student).await {
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

    async fn put(&self, id: i32, student: &UpdateStudent) -> AppResult<Student> {
        self.guard()?;
        self.repository.update(id, student).await
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
