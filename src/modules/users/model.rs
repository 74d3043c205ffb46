//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`UserRole`] - The two-tier role enum carried in tokens and rows
//! - [`User`] - User entity as stored in the database
//! - [`UserResponse`] - What clients see; never includes the password hash
//!
//! # Request DTOs
//!
//! - [`UpdateNameRequest`] - Self-service display-name update
//! - [`AdminUpdateUserRequest`] - Admin partial update of any user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Coarse permission tier carried inside bearer tokens and user rows.
///
/// Registration always assigns `User`; admins are created through the CLI
/// or promoted by another admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A user in the system.
///
/// Rows are soft-deleted: `deleted_at` is stamped instead of removing the
/// record, and every query filters on `deleted_at IS NULL`. The password
/// hash never leaves the service layer; responses use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Client-facing view of a user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            picture: user.picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for updating one's own display name.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateNameRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

/// DTO for admin updates of any user.
///
/// Omitted fields keep their current values. A changed email is re-checked
/// for uniqueness; a new password is re-hashed before storage.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
}
