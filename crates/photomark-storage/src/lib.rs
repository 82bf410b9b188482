//! Photomark storage library
//!
//! Storage abstraction over the buckets the pipeline reads from and
//! writes to. Backends address objects as `(bucket, key)` pairs and
//! carry the object's declared content-type alongside its bytes.
//!
//! Keys must not contain `..` or a leading `/`; backends reject such
//! keys before touching the underlying store.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub(crate) mod mime;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use photomark_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectStorage, StorageError, StorageResult, StoredObject};
