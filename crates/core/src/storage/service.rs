//! Blob store implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{ErrorKind, Operator, services};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Reference to a stored blob owned by exactly one content record.
///
/// `key` is the storage-internal identifier required to delete the blob;
/// `link` is the resolvable URL handed out for display. Both are always
/// present together, never one without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    /// Storage key used for deletion.
    pub key: String,
    /// Publicly resolvable URL.
    pub link: String,
}

/// Object storage capability surface consumed by the attachment coordinator.
///
/// Only the coordinator creates or destroys blob ownership; nothing else in
/// the system may call this trait for blobs referenced by a record.
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` under a freshly generated key, all-or-nothing.
    ///
    /// Every call produces a new key, so retried operations never collide
    /// with blobs referenced by earlier attempts.
    fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<BlobRef, StorageError>> + Send;

    /// Delete the blob stored under `key`.
    ///
    /// Idempotent: deleting a key that is already gone is a successful
    /// no-op. Compensation paths rely on this to retry safely.
    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Check whether a blob exists under `key`.
    fn exists(&self, key: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Blob store over an OpenDAL operator.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        let operator = match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::AzureBlob {
                account,
                access_key,
                container,
            } => {
                let builder = services::Azblob::default()
                    .account_name(account)
                    .account_key(access_key)
                    .container(container);

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
            }
        };

        Ok(operator)
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the size or MIME type is not allowed.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generate a fresh storage key for an upload.
    ///
    /// Format: `{uuid}/{sanitized_filename}`. The random prefix guarantees a
    /// new key per upload regardless of the caller-visible name.
    #[must_use]
    pub fn generate_blob_key(filename: &str) -> String {
        format!("{}/{}", Uuid::new_v4(), sanitize_filename(filename))
    }

    /// Resolve the public URL for a storage key.
    #[must_use]
    pub fn public_link(&self, key: &str) -> String {
        format!("{}/{}", self.config.public_url_base.trim_end_matches('/'), key)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

impl BlobStore for StorageService {
    async fn upload(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<BlobRef, StorageError> {
        self.validate_upload(content_type, bytes.len() as u64)?;

        let key = Self::generate_blob_key(filename);
        self.operator
            .write(&key, bytes)
            .await
            .map_err(StorageError::from)?;

        let link = self.public_link(&key);
        Ok(BlobRef { key, link })
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self.operator.delete(key).await {
            Ok(()) => Ok(()),
            // Already gone counts as deleted.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> bool {
        self.operator.stat(key).await.is_ok()
    }
}

/// Sanitize a filename for use in a storage key.
///
/// Only ASCII alphanumeric characters, dots, hyphens, and underscores pass
/// through; everything else becomes an underscore.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Sanitized filenames only contain storage-safe characters.
    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }

    // Blob keys are `{uuid}/{sanitized_filename}` and unique per upload.
    proptest! {
        #[test]
        fn prop_blob_key_format(filename in "[a-zA-Z0-9_-]{1,50}\\.[a-z]{2,4}") {
            let key = StorageService::generate_blob_key(&filename);

            let parts: Vec<&str> = key.split('/').collect();
            prop_assert_eq!(parts.len(), 2);
            prop_assert!(Uuid::parse_str(parts[0]).is_ok());
            prop_assert_eq!(parts[1], sanitize_filename(&filename));

            let other = StorageService::generate_blob_key(&filename);
            prop_assert_ne!(key, other);
        }
    }
}
