//! Student model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Identified;

/// Full student record as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub student_id: i32,
    pub name: String,
    pub email: String,
    pub contact_number: String,
    pub department: String,
}

impl Identified for Student {
    fn id(&self) -> i32 {
        self.student_id
    }
}

/// Create student request (id is assigned by the backend)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(max = 15, message = "Contact number must be at most 15 characters"))]
    pub contact_number: String,
    pub department: String,
}

/// Update student request
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateStudent {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 15, message = "Contact number must be at most 15 characters"))]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}
