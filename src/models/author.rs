//! Author model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Identified;

/// Full author record as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(rename = "AuthorID")]
    pub id: i32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
}

impl Identified for Author {
    fn id(&self) -> i32 {
        self.id
    }
}

/// Create author request (id is assigned by the backend)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateAuthor {
    #[serde(rename = "Name")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[serde(rename = "Bio")]
    pub bio: String,
}

/// Update author request
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateAuthor {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "Bio", skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
