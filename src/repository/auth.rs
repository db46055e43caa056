//! Authentication repository

use super::resource::Resource;
use crate::error::AppResult;
use crate::http::{json_body, ApiClient};
use crate::models::user::{LoginRequest, LoginResponse};

#[derive(Clone)]
pub struct AuthRepository {
    resource: Resource<LoginResponse>,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api"),
        }
    }

    /// Exchange credentials for a token pair and the librarian identity.
    /// The call itself is unauthenticated.
    pub async fn login(&self, credentials: &LoginRequest) -> AppResult<LoginResponse> {
        self.resource
            .post("/login/", Some(json_body(credentials)?))
            .await
    }
}
