//! Role-based authorization gate.
//!
//! Protected route groups are wrapped with
//! `axum::middleware::from_fn_with_state` pointing at [`require_admin`] or
//! [`require_user`]. The gate runs once per request, before the handler:
//!
//! 1. Read the `Authorization` header (401 `No token found` when absent or
//!    not a bearer token)
//! 2. Verify the token (401 `Invalid token`; an expired-but-parseable token
//!    answers 403 instead)
//! 3. Extract the subject id and role (401 `Failed to process request`)
//! 4. Check the role against the route's allowed set (403 `Action
//!    unauthorized`)
//! 5. Bind [`CurrentUser`] into the request and continue
//!
//! # Usage
//!
//! ```rust,ignore
//! let admin_routes = Router::new()
//!     .route("/", get(get_users))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
//! ```

use anyhow::anyhow;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use keygate_auth::{TokenError, extract_claims, verify_token};
use keygate_core::AppError;

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;

/// Whether `role` may pass a gate declaring `allowed` roles.
///
/// Admins pass every gate, even when the declared set does not name them.
/// Routes that want to be admin-only simply declare `[UserRole::Admin]`.
pub fn role_allows(role: UserRole, allowed: &[UserRole]) -> bool {
    role == UserRole::Admin || allowed.contains(&role)
}

/// Middleware that authenticates the bearer token and checks the carried
/// role against `allowed_roles`.
pub async fn require_roles(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::authentication("No token found", anyhow!("missing authorization header"))
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::authentication(
            "No token found",
            anyhow!("authorization header is not a bearer token"),
        )
    })?;

    verify_token(token, &state.jwt_config).map_err(|e| match e {
        // Structurally valid but past its window: 403, everything else 401
        TokenError::Expired => AppError::authorization("Invalid token", e),
        _ => AppError::authentication("Invalid token", e),
    })?;

    let (user_id, role) = extract_claims(token, &state.jwt_config)
        .map_err(|e| AppError::authentication("Failed to process request", e))?;

    let role: UserRole = role.parse().map_err(|_| {
        AppError::authentication("Failed to process request", anyhow!("unknown role in token"))
    })?;

    if !role_allows(role, &allowed_roles) {
        return Err(AppError::authorization(
            "Action unauthorized",
            anyhow!("role {} is not permitted for this route", role),
        ));
    }

    req.extensions_mut().insert(CurrentUser {
        id: user_id,
        role,
    });
    Ok(next.run(req).await)
}

/// Gate for admin-only routes.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Gate for routes any authenticated user may call.
pub async fn require_user(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::User]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
