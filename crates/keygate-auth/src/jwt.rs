//! Token issuing, verification, and claim extraction.
//!
//! Tokens are HMAC-SHA256 signed and expire 120 minutes after issue. The
//! validator only ever accepts HS256: a token declaring any other algorithm
//! (including `none` or an asymmetric scheme) is rejected before signature
//! verification, which closes the algorithm-confusion class of attacks.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode,
    errors::ErrorKind,
};
use std::fmt;
use uuid::Uuid;

use keygate_config::JwtConfig;

use crate::claims::Claims;

/// Issuer stamped into and required from every token.
pub const TOKEN_ISSUER: &str = "keygate";

/// Fixed token lifetime. Tokens are never renewed or revoked.
const TOKEN_LIFETIME_MINUTES: i64 = 120;

/// Why a token failed to verify (or to be issued).
///
/// The conditions are distinct so the authorization gate can answer
/// differently for an expired-but-well-formed token than for garbage.
#[derive(Debug)]
pub enum TokenError {
    /// Wall clock is past the token's `exp`.
    Expired,
    /// Signature does not verify under the configured secret.
    InvalidSignature,
    /// Token declares an algorithm other than HS256.
    UnexpectedAlgorithm,
    /// Issuer claim does not match [`TOKEN_ISSUER`].
    InvalidIssuer,
    /// Token is not parseable as a JWT at all.
    Malformed,
    /// Signing failed while issuing a token.
    Signing(jsonwebtoken::errors::Error),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "token has expired"),
            Self::InvalidSignature => write!(f, "token signature is invalid"),
            Self::UnexpectedAlgorithm => write!(f, "unexpected token signing algorithm"),
            Self::InvalidIssuer => write!(f, "token issuer mismatch"),
            Self::Malformed => write!(f, "token is malformed"),
            Self::Signing(e) => write!(f, "failed to sign token: {}", e),
        }
    }
}

impl std::error::Error for TokenError {}

/// Issues a signed bearer token for `user_id` carrying `role`.
///
/// The token expires [`TOKEN_LIFETIME_MINUTES`] after issue. Fails only if
/// the signing operation itself fails.
pub fn issue_token(user_id: Uuid, role: &str, jwt_config: &JwtConfig) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = now + chrono::Duration::minutes(TOKEN_LIFETIME_MINUTES);

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(TokenError::Signing)
}

/// Verifies a bearer token and returns its claims.
///
/// Checks, in order: the declared algorithm is HS256, the signature verifies
/// under the configured secret, the token has not expired, and the issuer
/// matches [`TOKEN_ISSUER`].
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
    if header.alg != Algorithm::HS256 {
        return Err(TokenError::UnexpectedAlgorithm);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[TOKEN_ISSUER]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnexpectedAlgorithm
        }
        ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
        _ => TokenError::Malformed,
    })
}

/// Re-validates a token and returns the `(subject id, role)` pair.
pub fn extract_claims(token: &str, jwt_config: &JwtConfig) -> Result<(Uuid, String), TokenError> {
    let claims = verify_token(token, jwt_config)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)?;
    Ok((user_id, claims.role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::new("test_secret_key_for_testing_purposes")
    }

    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_token_success() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), "user", &config).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_token_roundtrip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, "admin", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.iss, TOKEN_ISSUER);
    }

    #[test]
    fn test_token_lifetime_is_120_minutes() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), "user", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.exp - claims.iat, 120 * 60);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), "user", &config).unwrap();

        let wrong_config = JwtConfig::new("a_completely_different_secret_key");
        let result = verify_token(&token, &wrong_config);

        assert!(matches!(result, Err(TokenError::InvalidSignature)));
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "user".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            exp: now - 3600,
            iat: now - 3600 - 120 * 60,
        };
        let token = encode_raw(&claims, &config.secret);

        let result = verify_token(&token, &config);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_token_wrong_issuer() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "user".to_string(),
            iss: "somebody-else".to_string(),
            exp: now + 7200,
            iat: now,
        };
        let token = encode_raw(&claims, &config.secret);

        let result = verify_token(&token, &config);
        assert!(matches!(result, Err(TokenError::InvalidIssuer)));
    }

    #[test]
    fn test_verify_token_rejects_asymmetric_algorithm() {
        let config = get_test_jwt_config();

        // Header {"alg":"RS256","typ":"JWT"} with junk payload and signature
        let token = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJ4IiwiZXhwIjo5OTk5OTk5OTk5fQ.junk";
        let result = verify_token(token, &config);

        assert!(matches!(result, Err(TokenError::UnexpectedAlgorithm)));
    }

    #[test]
    fn test_verify_token_rejects_none_algorithm() {
        let config = get_test_jwt_config();

        // Header {"alg":"none","typ":"JWT"} with an unsigned payload
        let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiJ4IiwiZXhwIjo5OTk5OTk5OTk5fQ.";
        let result = verify_token(token, &config);

        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_malformed() {
        let config = get_test_jwt_config();
        let malformed_tokens = vec![
            "",
            "not-a-token",
            "not.enough",
            "too.many.parts.here.extra",
            "!!!.invalid.chars",
        ];

        for token in malformed_tokens {
            assert!(verify_token(token, &config).is_err());
        }
    }

    #[test]
    fn test_extract_claims_roundtrip() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, "user", &config).unwrap();
        let (id, role) = extract_claims(&token, &config).unwrap();

        assert_eq!(id, user_id);
        assert_eq!(role, "user");
    }

    #[test]
    fn test_extract_claims_rejects_non_uuid_subject() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;

        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            role: "user".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            exp: now + 7200,
            iat: now,
        };
        let token = encode_raw(&claims, &config.secret);

        let result = extract_claims(&token, &config);
        assert!(matches!(result, Err(TokenError::Malformed)));
    }

    #[test]
    fn test_different_users_get_different_tokens() {
        let config = get_test_jwt_config();
        let token1 = issue_token(Uuid::new_v4(), "user", &config).unwrap();
        let token2 = issue_token(Uuid::new_v4(), "user", &config).unwrap();

        assert_ne!(token1, token2);
    }
}
