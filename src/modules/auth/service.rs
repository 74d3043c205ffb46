use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;

use keygate_auth::issue_token;
use keygate_config::JwtConfig;
use keygate_core::{AppError, hash_password, verify_password};

use crate::modules::users::model::{User, UserRole};
use crate::modules::users::service::UserService;

use super::model::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    /// Creates a new account. The role is always `user`; admins are made
    /// through the CLI or by another admin.
    #[instrument(skip_all)]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        if UserService::find_by_email(db, &dto.email).await?.is_some() {
            return Err(AppError::conflict(
                "Failed to process user register request",
                anyhow!("email already exists"),
            ));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, email, password, role, picture, created_at, updated_at, deleted_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(UserRole::User)
        .fetch_one(db)
        .await
        .context("Failed to insert user")
        .map_err(AppError::database)?;

        Ok(user)
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller.
    #[instrument(skip_all)]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        let user = UserService::find_by_email(db, &dto.email).await?.ok_or_else(|| {
            AppError::authentication(
                "Entered credentials invalid",
                anyhow!("no user with that email"),
            )
        })?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::authentication(
                "Entered credentials invalid",
                anyhow!("password mismatch"),
            ));
        }

        let token = issue_token(user.id, user.role.as_str(), jwt_config)
            .map_err(|e| AppError::internal("Failed to process user login request", e))?;

        Ok(AuthResponse {
            token,
            role: user.role,
        })
    }
}
