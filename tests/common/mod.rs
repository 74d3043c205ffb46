use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use keygate::router::init_router;
use keygate::state::AppState;
use keygate_auth::issue_token;
use keygate_config::{CorsConfig, JwtConfig};
use keygate_core::file_storage::LocalFileStorage;
use keygate_core::hash_password;

/// Secret shared by the test app state and the tokens tests mint.
pub const TEST_JWT_SECRET: &str = "integration_test_secret_key";

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Create a test user. `role` is `"user"` or `"admin"`.
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    role: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let row: (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4::user_role)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id: row.0,
        email: email.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: JwtConfig::new(TEST_JWT_SECRET),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        storage: LocalFileStorage::new(std::env::temp_dir().join("keygate-test-uploads")),
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool))
}

/// Mint a valid bearer token for a test user.
#[allow(dead_code)]
pub fn token_for(user: &TestUser) -> String {
    issue_token(user.id, &user.role, &JwtConfig::new(TEST_JWT_SECRET)).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
