//! In-memory adapters for tests. Codes are unique per map, mirroring the
//! unique column the SQLite adapter puts on `code`.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::stream;
use std::path::PathBuf;

use crate::models::{FileRecord, TextRecord};
use crate::traits::{ByteStream, ContentStore, FileRepo, TextRepo};

pub use crate::traits::{MockCodeGenerator, MockContentStore, MockFileRepo, MockTextRepo};

#[derive(Default)]
pub struct MemoryTextRepo {
    by_code: DashMap<String, TextRecord>,
}

#[async_trait]
impl TextRepo for MemoryTextRepo {
    async fn save_text(&self, record: TextRecord) -> anyhow::Result<TextRecord> {
        match self.by_code.entry(record.code.clone()) {
            Entry::Occupied(_) => anyhow::bail!("duplicate code {}", record.code),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_text_by_code(&self, code: &str) -> anyhow::Result<Option<TextRecord>> {
        Ok(self.by_code.get(code).map(|r| r.value().clone()))
    }
}

#[derive(Default)]
pub struct MemoryFileRepo {
    by_code: DashMap<String, FileRecord>,
}

#[async_trait]
impl FileRepo for MemoryFileRepo {
    async fn save_file(&self, record: FileRecord) -> anyhow::Result<FileRecord> {
        match self.by_code.entry(record.code.clone()) {
            Entry::Occupied(_) => anyhow::bail!("duplicate code {}", record.code),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_file_by_code(&self, code: &str) -> anyhow::Result<Option<FileRecord>> {
        Ok(self.by_code.get(code).map(|r| r.value().clone()))
    }
}

/// Keeps bytes in a map keyed by their would-be absolute path.
pub struct MemoryContentStore {
    root: PathBuf,
    files: DashMap<String, Bytes>,
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/memory/uploads"),
            files: DashMap::new(),
        }
    }
}

impl MemoryContentStore {
    /// Drops bytes out-of-band, as if someone deleted the file on disk.
    pub fn remove(&self, path: &str) -> bool {
        self.files.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn write(&self, stored_filename: &str, data: Vec<u8>) -> anyhow::Result<String> {
        let path = self.root.join(stored_filename).to_string_lossy().into_owned();
        self.files.insert(path.clone(), Bytes::from(data));
        Ok(path)
    }

    async fn open(&self, path: &str) -> anyhow::Result<Option<ByteStream>> {
        Ok(self.files.get(path).map(|data| {
            let chunk: std::io::Result<Bytes> = Ok(data.value().clone());
            Box::pin(stream::iter(vec![chunk])) as ByteStream
        }))
    }

    fn root(&self) -> PathBuf {
        self.root.clone()
    }
}
