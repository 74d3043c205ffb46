//! # Keygate Core
//!
//! Core types, errors, and utilities for the Keygate API.
//!
//! This crate provides the foundational pieces shared by the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The uniform API response envelope
//! - [`pagination`]: Listing query parameters and pagination math
//! - [`password`]: Secure password hashing and verification
//! - [`file_storage`]: Storage abstraction for uploaded files
//!
//! # Example
//!
//! ```ignore
//! use keygate_core::errors::AppError;
//! use keygate_core::pagination::{ListQuery, paginate};
//! use keygate_core::password::{hash_password, verify_password};
//!
//! // Hash a password
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! // Resolve a page window
//! let window = paginate(1, 10, 25)?;
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{ListQuery, PageMeta, paginate};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
