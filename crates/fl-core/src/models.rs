//! # Domain Models
//!
//! The two record kinds Flingo hands out codes for. Both are written once
//! and never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRecord {
    pub id: Uuid,
    /// Public 6-character lookup token
    pub code: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a shared file. The bytes live in the `ContentStore` at `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: Uuid,
    pub code: String,
    /// Client-supplied name, stored verbatim
    pub original_filename: String,
    /// `<uuid>_<original_filename>`
    pub stored_filename: String,
    /// Client-declared MIME type, stored verbatim
    pub content_type: Option<String>,
    pub size: i64,
    /// Absolute location of the bytes in the content store
    pub path: String,
    pub created_at: DateTime<Utc>,
}

/// An upload as handed over by the transport layer.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub original_filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FileInput {
    pub fn new(original_filename: impl Into<String>, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            original_filename: original_filename.into(),
            content_type,
            data,
        }
    }

    /// Byte length of the upload.
    pub fn size(&self) -> i64 {
        self.data.len() as i64
    }
}
