//! Authors repository

use super::resource::Resource;
use crate::error::AppResult;
use crate::http::{json_body, ApiClient};
use crate::models::author::{Author, CreateAuthor, UpdateAuthor};

#[derive(Clone)]
pub struct AuthorsRepository {
    resource: Resource<Author>,
}

impl AuthorsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/authors"),
        }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Author>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.resource.get_by_id(id).await
    }

    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        self.resource.post("/", Some(json_body(author)?)).await
    }

    pub async fn update(&self, id: i32, author: &UpdateAuthor) -> AppResult<Author> {
        self.resource
            .put(&format!("/{}/", id), Some(json_body(author)?))
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.resource.delete(&format!("/{}/", id)).await
    }
}
