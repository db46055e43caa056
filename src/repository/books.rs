//! Books repository

use super::resource::Resource;
use crate::error::AppResult;
use crate::http::{json_body, ApiClient};
use crate::models::book::{Book, CreateBook, UpdateBook};

#[derive(Clone)]
pub struct BooksRepository {
    resource: Resource<Book>,
}

impl BooksRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/books"),
        }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Book>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.resource.get_by_id(id).await
    }

    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        self.resource.post("/", Some(json_body(book)?)).await
    }

    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        self.resource
            .put(&format!("/{}/", id), Some(json_body(book)?))
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.resource.delete(&format!("/{}/", id)).await
    }
}
