//! Generic resource facade: a fixed collection base path mapped onto the
//! five CRUD verbs. Purely routing and typing; no entity-specific logic.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppResult;
use crate::http::ApiClient;

pub struct Resource<T> {
    client: ApiClient,
    base_path: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_path: self.base_path.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> Resource<T> {
    pub fn new(client: ApiClient, base_path: &str) -> Self {
        Self {
            client,
            base_path: base_path.to_string(),
            _marker: PhantomData,
        }
    }

    /// Fetch the whole collection
    pub async fn get_all(&self) -> AppResult<Vec<T>> {
        self.client.get(&self.base_path).await
    }

    /// Fetch one record; an absent id surfaces as a 404 status error
    pub async fn get_by_id(&self, id: i32) -> AppResult<T> {
        self.client.get(&format!("{}/{}/", self.base_path, id)).await
    }

    /// Generic GET passthrough for entity-specific endpoints
    pub async fn get<R: DeserializeOwned>(&self, endpoint: &str) -> AppResult<R> {
        self.client.get(&self.join(endpoint)).await
    }

    pub async fn post<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<Value>,
    ) -> AppResult<R> {
        self.client.post(&self.join(endpoint), body).await
    }

    pub async fn put<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<Value>,
    ) -> AppResult<R> {
        self.client.put(&self.join(endpoint), body).await
    }

    pub async fn patch<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<Value>,
    ) -> AppResult<R> {
        self.client.patch(&self.join(endpoint), body).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, endpoint: &str) -> AppResult<R> {
        self.client.delete(&self.join(endpoint)).await
    }

    fn join(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_path, endpoint)
    }
}
