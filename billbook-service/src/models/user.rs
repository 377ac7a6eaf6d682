//! User model - account records plus the auth request/response shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored user document. The `password` field holds the argon2 hash and is
/// only ever serialized into the store, never into an API response - handlers
/// return [`UserProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub business_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_role() -> String {
    "Admin".to_string()
}

impl User {
    pub fn new(email: String, password_hash: String, name: String, mobile: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            password: password_hash,
            name,
            mobile,
            role: default_role(),
            business_id: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// User as returned by the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub mobile: Option<String>,
    pub role: String,
    pub business_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            mobile: u.mobile,
            role: u.role,
            business_id: u.business_id,
            is_active: u.is_active,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub mobile: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}
