//! Request and response models for the API.
//!
//! All models use serde for serialization/deserialization.
//! Row models derive sqlx::FromRow and map one-to-one onto table columns.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Auth Models
// ============================================================================

/// Request body for account registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Response after successful registration.
///
/// Deliberately carries no password material.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: i32,
    pub username: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response after successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub msg: String,
}

/// Account row from the `users` table.
///
/// The `password` column holds the bcrypt hash. It never serializes:
/// the hash must not appear in any response body.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

// ============================================================================
// Team Models
// ============================================================================

/// Team row from the `equipos` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Team {
    pub id: i32,
    pub name: String,
}

/// Player with its position name, joined from `jugadores` and `posiciones`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Player {
    pub name: String,
    pub posicion: String,
}

// ============================================================================
// Post Models
// ============================================================================

/// Post row from the `post` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub description: String,
    /// Public path of the uploaded image, when one was attached.
    pub url: Option<String>,
}

/// Confirmation message returned by post mutations.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_never_serializes_password_hash() {
        let account = Account {
            id: 7,
            username: "alice".to_string(),
            password: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_post_url_serializes_as_null_when_absent() {
        let post = Post {
            id: 1,
            description: "no image".to_string(),
            url: None,
        };

        let json = serde_json::to_value(&post).unwrap();
        assert!(json["url"].is_null());
    }
}
