use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::UserRole;

/// Registration request. The assigned role is always `user`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Login response: the bearer token plus the role it carries.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let dto = RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(dto.validate().is_ok());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..dto.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequest {
            email: "nope".to_string(),
            ..dto.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = RegisterRequest {
            name: String::new(),
            ..dto
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let dto = LoginRequest {
            email: "jane@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(dto.validate().is_ok());

        let empty_password = LoginRequest {
            password: String::new(),
            ..dto
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_auth_response_serialize() {
        let resp = AuthResponse {
            token: "abc.def.ghi".to_string(),
            role: UserRole::User,
        };
        let serialized = serde_json::to_string(&resp).unwrap();
        assert!(serialized.contains(r#""token":"abc.def.ghi""#));
        assert!(serialized.contains(r#""role":"user""#));
    }
}
