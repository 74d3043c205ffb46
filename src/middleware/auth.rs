use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use keygate_core::AppError;

use crate::modules::users::model::UserRole;

/// Authenticated identity bound into the request by the authorization gate.
///
/// Handlers receive this through the extractor below; it is only present on
/// requests that passed [`crate::middleware::role::require_roles`].
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: Uuid,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| {
                AppError::authentication(
                    "Failed to process request",
                    anyhow::anyhow!("request reached a handler without passing the auth gate"),
                )
            })
    }
}
