//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to publish a post. `tags` is a comma separated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub tags: String,
    pub content: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub role: String,
}

/// Response after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub redirect: String,
}

/// Response telling the client where to go next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub redirect: String,
}

/// Response carrying the id of a created resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// A post as shown in the feed or the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub desc: String,
    pub date_created: String,
    pub author_id: i32,
    pub categories: Vec<String>,
}

/// One invalid form field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}
