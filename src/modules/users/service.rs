use anyhow::{Context, anyhow};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use keygate_core::file_storage::{FileStorage, StorageError};
use keygate_core::pagination::{ListQuery, PageMeta, paginate};
use keygate_core::{AppError, hash_password};

use crate::modules::users::model::{AdminUpdateUserRequest, User, UserResponse};

const USER_COLUMNS: &str =
    "id, name, email, password, role, picture, created_at, updated_at, deleted_at";

/// Fields the listing endpoint may sort by. The sort expression is
/// interpolated into the query, so anything outside this list is rejected
/// up front.
const SORTABLE_FIELDS: &[&str] = &["name", "email", "role", "created_at", "updated_at"];

fn order_clause(sort: &str) -> Result<String, AppError> {
    let (field, direction) = match sort.strip_prefix('-') {
        Some(field) => (field, "DESC"),
        None => (sort, "ASC"),
    };

    if !SORTABLE_FIELDS.contains(&field) {
        return Err(AppError::validation(
            "Failed to fetch users",
            anyhow!("cannot sort by '{}'", field),
        ));
    }

    Ok(format!("{} {}", field, direction))
}

pub struct UserService;

impl UserService {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by id")
        .map_err(AppError::database)?;

        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(db)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::database)?;

        Ok(user)
    }

    pub async fn get_user(db: &PgPool, id: Uuid) -> Result<UserResponse, AppError> {
        let user = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found("Failed to fetch user", anyhow!("user not found")))?;

        Ok(user.into())
    }

    /// Filtered, sorted, paginated user listing.
    ///
    /// Returns `None` metadata when `per_page` is 0: the caller gets every
    /// matching row and the response carries no `meta` block.
    #[instrument(skip_all)]
    pub async fn get_all_users(
        db: &PgPool,
        query: &ListQuery,
    ) -> Result<(Vec<UserResponse>, Option<PageMeta>), AppError> {
        let search = query.search().map(|s| format!("%{}%", s));

        let total: i64 = match &search {
            Some(pattern) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM users
                     WHERE deleted_at IS NULL AND (name ILIKE $1 OR email ILIKE $1)",
                )
                .bind(pattern)
                .fetch_one(db)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
                    .fetch_one(db)
                    .await
            }
        }
        .context("Failed to count users")
        .map_err(AppError::database)?;

        let window = paginate(query.page(), query.per_page(), total)
            .map_err(|e| AppError::invalid_page("Failed to fetch users", e))?;

        let mut sql = format!("SELECT {} FROM users WHERE deleted_at IS NULL", USER_COLUMNS);
        if search.is_some() {
            sql.push_str(" AND (name ILIKE $1 OR email ILIKE $1)");
        }
        if let Some(sort) = query.sort() {
            sql.push_str(&format!(" ORDER BY {}", order_clause(sort)?));
        }
        if let Some((window, _)) = &window {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", window.limit, window.offset));
        }

        let rows = match &search {
            Some(pattern) => {
                sqlx::query_as::<_, User>(&sql)
                    .bind(pattern)
                    .fetch_all(db)
                    .await
            }
            None => sqlx::query_as::<_, User>(&sql).fetch_all(db).await,
        }
        .context("Failed to fetch users")
        .map_err(AppError::database)?;

        let users = rows.into_iter().map(UserResponse::from).collect();
        Ok((users, window.map(|(_, meta)| meta)))
    }

    #[instrument(skip_all)]
    pub async fn update_self_name(
        db: &PgPool,
        id: Uuid,
        name: &str,
    ) -> Result<UserResponse, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(db)
        .await
        .context("Failed to update user name")
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::not_found(
                "Failed to process user update request",
                anyhow!("user not found"),
            )
        })?;

        Ok(user.into())
    }

    /// Admin partial update. Omitted fields keep their current values.
    #[instrument(skip_all)]
    pub async fn update_user(
        db: &PgPool,
        id: Uuid,
        dto: AdminUpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let current = Self::find_by_id(db, id).await?.ok_or_else(|| {
            AppError::not_found(
                "Failed to process user update request",
                anyhow!("user not found"),
            )
        })?;

        if let Some(email) = &dto.email {
            if email != &current.email && Self::find_by_email(db, email).await?.is_some() {
                return Err(AppError::conflict(
                    "Failed to process user update request",
                    anyhow!("email already exists"),
                ));
            }
        }

        let password_hash = match &dto.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                role = COALESCE($4, role),
                password = COALESCE($5, password),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(dto.name)
        .bind(dto.email)
        .bind(dto.role)
        .bind(password_hash)
        .fetch_optional(db)
        .await
        .context("Failed to update user")
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::not_found(
                "Failed to process user update request",
                anyhow!("user not found"),
            )
        })?;

        Ok(user.into())
    }

    /// Soft delete: the row is retained with `deleted_at` stamped and is
    /// invisible to every subsequent query.
    #[instrument(skip_all)]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await
        .context("Failed to delete user")
        .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Failed to process user delete request",
                anyhow!("user not found"),
            ));
        }

        Ok(())
    }

    /// Replaces the user's profile picture, deleting the previous file first.
    #[instrument(skip_all)]
    pub async fn change_picture(
        db: &PgPool,
        storage: &dyn FileStorage,
        id: Uuid,
        content: &[u8],
    ) -> Result<UserResponse, AppError> {
        const MESSAGE: &str = "Failed to process user picture update request";

        let user = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(MESSAGE, anyhow!("user not found")))?;

        if let Some(old_picture) = &user.picture {
            storage
                .delete(old_picture)
                .await
                .map_err(|e| AppError::internal(MESSAGE, e))?;
        }

        let key = format!("user_picture/{}", Uuid::new_v4());
        storage.save(&key, content).await.map_err(|e| match e {
            StorageError::InvalidFileSize { .. } | StorageError::InvalidKey(_) => {
                AppError::validation(MESSAGE, e)
            }
            StorageError::IoError(_) => AppError::internal(MESSAGE, e),
        })?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET picture = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(&key)
        .fetch_optional(db)
        .await
        .context("Failed to update user picture")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(MESSAGE, anyhow!("user not found")))?;

        Ok(user.into())
    }

    /// Removes the user's profile picture. Fails when the user has none.
    #[instrument(skip_all)]
    pub async fn delete_picture(
        db: &PgPool,
        storage: &dyn FileStorage,
        id: Uuid,
    ) -> Result<(), AppError> {
        const MESSAGE: &str = "Failed to process user picture delete request";

        let user = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| AppError::not_found(MESSAGE, anyhow!("user not found")))?;

        let picture = user
            .picture
            .ok_or_else(|| AppError::not_found(MESSAGE, anyhow!("user does not have a picture")))?;

        if storage.exists(&picture).await {
            storage
                .delete(&picture)
                .await
                .map_err(|e| AppError::internal(MESSAGE, e))?;
        }

        sqlx::query(
            "UPDATE users SET picture = NULL, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await
        .context("Failed to clear user picture")
        .map_err(AppError::database)?;

        Ok(())
    }
}
