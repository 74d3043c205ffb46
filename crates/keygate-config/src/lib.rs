//! # Keygate Config
//!
//! Environment-driven configuration for the Keygate API.
//!
//! Each config struct is constructed explicitly (usually via `from_env()`)
//! and injected where it is needed, rather than read from ambient global
//! state. Tests build the structs directly with known values.
//!
//! # Modules
//!
//! - [`jwt`]: JWT signing configuration
//! - [`cors`]: CORS allowed origins
//! - [`storage`]: Upload directory for profile pictures
//! - [`database`]: PostgreSQL connection pool initialization

pub mod cors;
pub mod database;
pub mod jwt;
pub mod storage;

pub use cors::CorsConfig;
pub use database::init_db_pool;
pub use jwt::JwtConfig;
pub use storage::StorageConfig;
