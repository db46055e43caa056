//! Students repository

use super::resource::Resource;
use crate::error::AppResult;
use crate::http::{json_body, ApiClient};
use crate::models::student::{CreateStudent, Student, UpdateStudent};

#[derive(Clone)]
pub struct StudentsRepository {
    resource: Resource<Student>,
}

impl StudentsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/students"),
        }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Student>> {
        self.resource.get_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Student> {
        self.resource.get_by_id(id).await
    }

    pub async fn create(&self, student: &CreateStudent) -> AppResult<Student> {
        self.resource.post("/", Some(json_body(student)?)).await
    }

    pub async fn update(&self, id: i32, student: &UpdateStudent) -> AppResult<Student> {
        self.resource
            .put(&format!("/{}/", id), Some(json_body(student)?))
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.resource.delete(&format!("/{}/", id)).await
    }
}
