//! File storage abstraction for uploaded files.
//!
//! Profile pictures are stored behind the [`FileStorage`] trait so the
//! backend can be swapped without touching business logic. The only
//! implementation shipped here is [`LocalFileStorage`], which writes under a
//! base directory on the local filesystem.
//!
//! # Example
//!
//! ```ignore
//! use keygate_core::file_storage::{FileStorage, LocalFileStorage};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(PathBuf::from("./files"));
//!
//! let key = storage.save("user_picture/abc-123", &bytes).await?;
//! assert!(storage.exists(&key).await);
//! storage.delete(&key).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Save file content under `key` and return the key.
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<String, StorageError>> + Send + 'a>>;

    /// Delete a file by key. Deleting a missing file is not an error.
    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>>;

    /// Whether a file exists for `key`.
    fn exists<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// I/O error from the underlying filesystem.
    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "file exceeds maximum size of {} bytes", max_bytes)
            }
            Self::IoError(e) => write!(f, "i/o error: {}", e),
            Self::InvalidKey(msg) => write!(f, "invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Local filesystem-based file storage.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Base directory where files are stored
    base_dir: PathBuf,

    /// Maximum file size in bytes
    max_file_size: usize,
}

const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    pub fn with_max_size(base_dir: PathBuf, max_file_size: usize) -> Self {
        Self {
            base_dir,
            max_file_size,
        }
    }

    /// Validate storage key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '/' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<String, StorageError>> + Send + 'a>> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            let file_path = self.base_dir.join(key);

            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).await?;
            }

            fs::write(&file_path, content).await?;

            Ok(key.to_string())
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + 'a>> {
        Box::pin(async move {
            Self::validate_key(key)?;

            let file_path = self.base_dir.join(key);

            match fs::remove_file(&file_path).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn exists<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            if Self::validate_key(key).is_err() {
                return false;
            }
            fs::try_exists(self.base_dir.join(key)).await.unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("user_picture/abc-123").is_ok());
        assert!(LocalFileStorage::validate_key("user_picture/abc-123.png").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("user_picture/../secret").is_err());
    }

    #[test]
    fn test_validate_key_rejects_absolute_paths() {
        assert!(LocalFileStorage::validate_key("/etc/passwd").is_err());
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_save_and_delete_roundtrip() {
        let dir = std::env::temp_dir().join(format!("keygate-storage-test-{}", std::process::id()));
        let storage = LocalFileStorage::new(dir.clone());

        let key = storage.save("user_picture/test-file", b"content").await.unwrap();
        assert_eq!(key, "user_picture/test-file");
        assert!(storage.exists(&key).await);

        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await);

        // Deleting again is tolerated
        storage.delete(&key).await.unwrap();

        let _ = tokio::fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_content() {
        let dir = std::env::temp_dir().join("keygate-storage-size-test");
        let storage = LocalFileStorage::with_max_size(dir, 4);

        let result = storage.save("user_picture/too-big", b"12345").await;
        assert!(matches!(
            result,
            Err(StorageError::InvalidFileSize { max_bytes: 4 })
        ));
    }
}
