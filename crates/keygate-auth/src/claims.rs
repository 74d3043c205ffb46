//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every bearer token.
///
/// The role travels as a plain string inside the token; it is parsed into
/// the role enum at the authorization gate so an unknown value is rejected
/// at the boundary rather than deep in a handler.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Role carried by the token (`user` or `admin`)
    pub role: String,
    /// Issuer, always [`crate::jwt::TOKEN_ISSUER`]
    pub iss: String,
    /// Expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
