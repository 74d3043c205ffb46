use axum::{extract::State, http::StatusCode};
use tracing::instrument;

use keygate_core::{ApiResponse, AppError};

use crate::modules::users::model::UserResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AuthResponse, LoginRequest, RegisterRequest};
use super::service::AuthService;

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User register successful", body = UserResponse),
        (status = 400, description = "Validation error or email already exists")
    ),
    tag = "Auth"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = AuthService::register(&state.db, dto).await?;
    Ok(ApiResponse::success(
        "User register successful",
        StatusCode::CREATED,
        user.into(),
    ))
}

/// Login with email and password, receiving a bearer token
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User login successful", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Entered credentials invalid")
    ),
    tag = "Auth"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    let auth = AuthService::login(&state.db, &state.jwt_config, dto).await?;
    Ok(ApiResponse::success(
        "User login successful",
        StatusCode::OK,
        auth,
    ))
}
