use chrono::{DateTime, Utc};
use restkit_core::serde::{deserialize_optional_string, deserialize_trimmed_string};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a contact, as JSON or form data.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContact {
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[serde(deserialize_with = "deserialize_trimmed_string")]
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 32, message = "phone is too long"))]
    pub phone: Option<String>,
}

/// Listing filter, read from the query string next to the page cursor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactFilter {
    /// Case-insensitive match against name or email.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 64, message = "search term is too long"))]
    pub q: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct ContactPath {
    #[validate(range(min = 1, message = "id must be positive"))]
    pub id: i64,
}
