use anyhow::anyhow;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use keygate_core::pagination::ListQuery;
use keygate_core::{ApiResponse, AppError};

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::{AdminUpdateUserRequest, UpdateNameRequest, UserResponse};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List users with optional search, sort, and pagination (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListQuery),
    responses(
        (status = 200, description = "Users fetched successfully", body = Vec<UserResponse>),
        (status = 400, description = "Invalid page or sort field"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Insufficient role")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
    let (users, meta) = UserService::get_all_users(&state.db, &query).await?;

    Ok(match meta {
        Some(meta) => {
            ApiResponse::paginated("Users fetched successfully", StatusCode::OK, users, meta)
        }
        None => ApiResponse::success("Users fetched successfully", StatusCode::OK, users),
    })
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "User fetched successfully", body = UserResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn get_me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let profile = UserService::get_user(&state.db, user.id).await?;
    Ok(ApiResponse::success(
        "User fetched successfully",
        StatusCode::OK,
        profile,
    ))
}

/// Update the authenticated user's display name
#[utoipa::path(
    patch,
    path = "/api/users/me/name",
    request_body = UpdateNameRequest,
    responses(
        (status = 200, description = "User update successful", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_me_name(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateNameRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let updated = UserService::update_self_name(&state.db, user.id, &dto.name).await?;
    Ok(ApiResponse::success(
        "User update successful",
        StatusCode::OK,
        updated,
    ))
}

/// Soft-delete the authenticated user's account
#[utoipa::path(
    delete,
    path = "/api/users/me",
    responses(
        (status = 200, description = "User delete successful"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    UserService::delete_user(&state.db, user.id).await?;
    Ok(ApiResponse::success(
        "User delete successful",
        StatusCode::OK,
        serde_json::Value::Null,
    ))
}

/// Update any user by id (admin only)
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}",
    request_body = AdminUpdateUserRequest,
    params(("user_id" = Uuid, Path, description = "User to update")),
    responses(
        (status = 200, description = "User update successful", body = UserResponse),
        (status = 400, description = "Validation error, unknown user, or duplicate email"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Insufficient role")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AdminUpdateUserRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let updated = UserService::update_user(&state.db, user_id, dto).await?;
    Ok(ApiResponse::success(
        "User update successful",
        StatusCode::OK,
        updated,
    ))
}

/// Soft-delete any user by id (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User to delete")),
    responses(
        (status = 200, description = "User delete successful"),
        (status = 400, description = "Unknown user"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Insufficient role")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    UserService::delete_user(&state.db, user_id).await?;
    Ok(ApiResponse::success(
        "User delete successful",
        StatusCode::OK,
        serde_json::Value::Null,
    ))
}

/// Upload or replace the authenticated user's profile picture
#[utoipa::path(
    patch,
    path = "/api/users/picture",
    responses(
        (status = 200, description = "User picture update successful", body = UserResponse),
        (status = 400, description = "Missing or oversized picture"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn change_picture(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> Result<ApiResponse<UserResponse>, AppError> {
    const MESSAGE: &str = "Failed to process user picture update request";

    let mut content: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(MESSAGE, e))?
    {
        if field.name() == Some("picture") {
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(MESSAGE, e))?
                    .to_vec(),
            );
        }
    }

    let content =
        content.ok_or_else(|| AppError::validation(MESSAGE, anyhow!("picture file is required")))?;

    let updated =
        UserService::change_picture(&state.db, &state.storage, user.id, &content).await?;
    Ok(ApiResponse::success(
        "User picture update successful",
        StatusCode::OK,
        updated,
    ))
}

/// Delete a user's profile picture by user id (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/picture/{user_id}",
    params(("user_id" = Uuid, Path, description = "User whose picture to delete")),
    responses(
        (status = 200, description = "User picture delete successful"),
        (status = 400, description = "Unknown user or no picture set"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Insufficient role")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn delete_picture(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    UserService::delete_picture(&state.db, &state.storage, user_id).await?;
    Ok(ApiResponse::success(
        "User picture delete successful",
        StatusCode::OK,
        serde_json::Value::Null,
    ))
}
