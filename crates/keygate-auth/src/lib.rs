//! # Keygate Auth
//!
//! JWT claims and token utilities for the Keygate API.
//!
//! This crate provides:
//!
//! - [`claims`]: The claim structure embedded in bearer tokens
//! - [`jwt`]: Token issuing, verification, and claim extraction
//!
//! Tokens are self-contained: a single HS256-signed token carries the
//! subject id and role for a fixed 120-minute window. There is no refresh
//! or revocation; expiry and secret rotation are the only invalidation.
//!
//! # Example
//!
//! ```ignore
//! use keygate_auth::{issue_token, verify_token};
//! use keygate_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//!
//! let token = issue_token(user_id, "user", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, "user");
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TOKEN_ISSUER, TokenError, extract_claims, issue_token, verify_token};
