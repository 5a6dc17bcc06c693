//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Register / Login
// ============================================================================

/// Body of `/register` and `/login`. Missing fields decode as empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// ============================================================================
// Validation errors (422)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub location: &'static str,
    pub param: &'static str,
    pub value: String,
    pub msg: &'static str,
}

/// `{"errors":[{location,param,value,msg}]}`
#[derive(Debug, Clone, Serialize)]
pub struct FieldErrorsResponse {
    pub errors: Vec<FieldError>,
}

impl FieldErrorsResponse {
    pub fn username_taken(username: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                location: "body",
                param: "username",
                value: username.into(),
                msg: "already exists",
            }],
        }
    }
}

// ============================================================================
// Generic
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
