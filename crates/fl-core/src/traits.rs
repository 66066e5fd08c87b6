//! # Core Traits (Ports)
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;
use std::path::PathBuf;
use std::pin::Pin;

use crate::models::{FileRecord, TextRecord};

/// Chunked bytes read back from the content store.
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Persistence contract for shared text.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TextRepo: Send + Sync {
    /// Stores the record and returns it as persisted.
    async fn save_text(&self, record: TextRecord) -> anyhow::Result<TextRecord>;
    async fn find_text_by_code(&self, code: &str) -> anyhow::Result<Option<TextRecord>>;
}

/// Persistence contract for shared file metadata.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FileRepo: Send + Sync {
    async fn save_file(&self, record: FileRecord) -> anyhow::Result<FileRecord>;
    async fn find_file_by_code(&self, code: &str) -> anyhow::Result<Option<FileRecord>>;
}

/// Byte storage for uploads, kept apart from the record store.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Writes `data` under `stored_filename`, creating the root if needed.
    /// Returns the absolute path of the written file.
    async fn write(&self, stored_filename: &str, data: Vec<u8>) -> anyhow::Result<String>;

    /// Opens previously written bytes. `None` if nothing is stored at `path`.
    async fn open(&self, path: &str) -> anyhow::Result<Option<ByteStream>>;

    /// Absolute root directory of the store.
    fn root(&self) -> PathBuf;
}

/// Source of public lookup codes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}
