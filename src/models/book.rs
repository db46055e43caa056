//! Book model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Identified;

/// Full book record as returned by the backend.
/// `author` is a foreign key to an [`super::Author`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    #[serde(rename = "BookId")]
    pub id: i32,
    #[serde(rename = "Title")]
    pub title: String,
    pub author: i32,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(rename = "Quantity")]
    pub quantity: i32,
}

impl Identified for Book {
    fn id(&self) -> i32 {
        self.id
    }
}

/// Create book request (id is assigned by the backend)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateBook {
    #[serde(rename = "Title")]
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub author: i32,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "ISBN")]
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: String,
    #[serde(rename = "Quantity")]
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
}

/// Update book request
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateBook {
    #[serde(rename = "Title", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<i32>,
    #[serde(rename = "Genre", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "ISBN", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 10, max = 13, message = "ISBN must be 10 to 13 characters"))]
    pub isbn: Option<String>,
    #[serde(rename = "Quantity", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
}
