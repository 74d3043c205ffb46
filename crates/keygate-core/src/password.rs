//! Password hashing and verification built on bcrypt.
//!
//! Verification is the canonical bcrypt comparison: a wrong password is
//! `Ok(false)`, never an error. Only a structurally invalid stored hash
//! produces an error.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal("Failed to hash password", anyhow::Error::new(e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal("Failed to verify password", anyhow::Error::new(e)))
}
