use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use keygate_core::pagination::{ListQuery, PageMeta};

use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequest};
use crate::modules::users::model::{
    AdminUpdateUserRequest, UpdateNameRequest, UserResponse, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me_name,
        crate::modules::users::controller::delete_me,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::change_picture,
        crate::modules::users::controller::delete_picture,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            UpdateNameRequest,
            AdminUpdateUserRequest,
            ListQuery,
            PageMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User management endpoints")
    ),
    info(
        title = "Keygate API",
        version = "0.1.0",
        description = "A user-management REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
