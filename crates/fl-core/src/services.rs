//! # Sharing Services
//!
//! Text and file sharing follow the same lifecycle: generate a code, persist
//! a record, hand it back; look it up later by that code. Files add one
//! step in front, writing the bytes to the content store before the record
//! is saved. The two steps are not atomic: if the save fails, the bytes stay
//! behind in the store.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::code::is_well_formed;
use crate::error::{AppError, Result};
use crate::models::{FileInput, FileRecord, TextRecord};
use crate::traits::{ByteStream, CodeGenerator, ContentStore, FileRepo, TextRepo};

/// Orchestrates saving and retrieving shared text.
#[derive(Clone)]
pub struct TextShareService {
    repo: Arc<dyn TextRepo>,
    codes: Arc<dyn CodeGenerator>,
}

impl TextShareService {
    pub fn new(repo: Arc<dyn TextRepo>, codes: Arc<dyn CodeGenerator>) -> Self {
        Self { repo, codes }
    }

    /// Stores `content` under a fresh code and returns the persisted record.
    pub async fn save_text(&self, content: String) -> Result<TextRecord> {
        let record = TextRecord {
            id: Uuid::new_v4(),
            code: self.codes.generate(),
            content,
            created_at: Utc::now(),
        };

        let saved = self
            .repo
            .save_text(record)
            .await
            .map_err(|e| AppError::Persistence(e.to_string()))?;

        log::info!("shared text {} under code {}", saved.id, saved.code);
        Ok(saved)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<TextRecord> {
        match self.repo.find_text_by_code(code).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                log::debug!("no text for code {:?} (well-formed: {})", code, is_well_formed(code));
                Err(AppError::InvalidCode(code.to_string()))
            }
            Err(e) => Err(AppError::Persistence(e.to_string())),
        }
    }
}

/// A file ready to be sent back to the client.
pub struct FileDownload {
    pub record: FileRecord,
    pub body: ByteStream,
}

/// Orchestrates uploads, metadata lookups, and downloads.
#[derive(Clone)]
pub struct FileShareService {
    repo: Arc<dyn FileRepo>,
    store: Arc<dyn ContentStore>,
    codes: Arc<dyn CodeGenerator>,
}

impl FileShareService {
    pub fn new(repo: Arc<dyn FileRepo>, store: Arc<dyn ContentStore>, codes: Arc<dyn CodeGenerator>) -> Self {
        Self { repo, store, codes }
    }

    /// Writes the upload's bytes, then persists its metadata under a fresh code.
    ///
    /// A failed write leaves no record behind. A failed save after a good
    /// write leaves the bytes orphaned in the store; this is logged and the
    /// save error is returned.
    pub async fn save_file(&self, upload: FileInput) -> Result<FileRecord> {
        let size = upload.size();
        let stored_filename = format!("{}_{}", Uuid::new_v4(), upload.original_filename);

        let path = self
            .store
            .write(&stored_filename, upload.data)
            .await
            .map_err(|e| AppError::StorageWrite(e.to_string()))?;

        let record = FileRecord {
            id: Uuid::new_v4(),
            code: self.codes.generate(),
            original_filename: upload.original_filename,
            stored_filename,
            content_type: upload.content_type,
            size,
            path,
            created_at: Utc::now(),
        };

        match self.repo.save_file(record).await {
            Ok(saved) => {
                log::info!(
                    "shared file {:?} ({} bytes) under code {}",
                    saved.original_filename,
                    saved.size,
                    saved.code
                );
                Ok(saved)
            }
            Err(e) => {
                log::warn!("file metadata save failed, bytes left orphaned: {}", e);
                Err(AppError::Persistence(e.to_string()))
            }
        }
    }

    pub async fn get_by_code(&self, code: &str) -> Result<FileRecord> {
        match self.repo.find_file_by_code(code).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                log::debug!("no file for code {:?} (well-formed: {})", code, is_well_formed(code));
                Err(AppError::InvalidCode(code.to_string()))
            }
            Err(e) => Err(AppError::Persistence(e.to_string())),
        }
    }

    /// Looks up the record and opens its bytes.
    /// `MissingStoredFile` when the record exists but the bytes do not.
    pub async fn download_by_code(&self, code: &str) -> Result<FileDownload> {
        let record = self.get_by_code(code).await?;

        let body = self
            .store
            .open(&record.path)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        match body {
            Some(body) => Ok(FileDownload { record, body }),
            None => {
                log::warn!("code {} points at missing bytes {}", code, record.path);
                Err(AppError::MissingStoredFile(code.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::SeededCodes;
    use crate::testing::{MemoryContentStore, MemoryFileRepo, MemoryTextRepo};
    use crate::traits::{MockContentStore, MockFileRepo, MockTextRepo};
    use futures_util::TryStreamExt;

    fn text_service() -> TextShareService {
        TextShareService::new(Arc::new(MemoryTextRepo::default()), Arc::new(SeededCodes::new(1)))
    }

    fn file_service(store: Arc<MemoryContentStore>) -> FileShareService {
        FileShareService::new(Arc::new(MemoryFileRepo::default()), store, Arc::new(SeededCodes::new(2)))
    }

    async fn collect(body: ByteStream) -> Vec<u8> {
        let chunks: Vec<bytes::Bytes> = body.try_collect().await.unwrap();
        chunks.concat()
    }

    #[tokio::test]
    async fn test_save_text_round_trip() {
        let service = text_service();

        let saved = service.save_text("hello world".to_string()).await.unwrap();
        assert_eq!(saved.content, "hello world");
        assert!(is_well_formed(&saved.code));

        let found = service.get_by_code(&saved.code).await.unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_unknown_text_code_is_invalid() {
        let service = text_service();
        service.save_text("something".to_string()).await.unwrap();

        let err = service.get_by_code("000000").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCode(ref c) if c == "000000"));
    }

    #[tokio::test]
    async fn test_empty_stores_reject_unknown_codes() {
        let text_err = text_service().get_by_code("ZZZZZZ").await.unwrap_err();
        let file_err = file_service(Arc::new(MemoryContentStore::default()))
            .get_by_code("ZZZZZZ")
            .await
            .unwrap_err();
        assert!(matches!(text_err, AppError::InvalidCode(_)));
        assert!(matches!(file_err, AppError::InvalidCode(_)));
    }

    #[tokio::test]
    async fn test_text_code_collision_fails_without_retry() {
        let mut codes = crate::traits::MockCodeGenerator::new();
        codes.expect_generate().times(2).returning(|| "AAAAAA".to_string());
        let service = TextShareService::new(Arc::new(MemoryTextRepo::default()), Arc::new(codes));

        service.save_text("first".to_string()).await.unwrap();
        let err = service.save_text("second".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));

        let kept = service.get_by_code("AAAAAA").await.unwrap();
        assert_eq!(kept.content, "first");
    }

    #[tokio::test]
    async fn test_text_repo_failure_is_persistence_error() {
        let mut repo = MockTextRepo::new();
        repo.expect_find_text_by_code()
            .returning(|_| Err(anyhow::anyhow!("database is locked")));
        let service = TextShareService::new(Arc::new(repo), Arc::new(SeededCodes::new(3)));

        let err = service.get_by_code("A1B2C3").await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(ref m) if m.contains("locked")));
    }

    #[tokio::test]
    async fn test_save_file_round_trip() {
        let store = Arc::new(MemoryContentStore::default());
        let service = file_service(store.clone());

        let upload = FileInput::new("report.pdf", Some("application/pdf".to_string()), b"0123456789".to_vec());
        let saved = service.save_file(upload).await.unwrap();

        assert_eq!(saved.size, 10);
        assert_eq!(saved.original_filename, "report.pdf");
        assert_eq!(saved.content_type.as_deref(), Some("application/pdf"));
        assert!(saved.stored_filename.ends_with("_report.pdf"));
        let token = saved.stored_filename.trim_end_matches("_report.pdf");
        assert!(Uuid::parse_str(token).is_ok(), "{token}");

        let found = service.get_by_code(&saved.code).await.unwrap();
        assert_eq!(found, saved);

        let download = service.download_by_code(&saved.code).await.unwrap();
        assert_eq!(download.record, saved);
        assert_eq!(collect(download.body).await, b"0123456789");
    }

    #[tokio::test]
    async fn test_same_name_uploads_get_distinct_stored_names() {
        let store = Arc::new(MemoryContentStore::default());
        let service = file_service(store.clone());

        let a = service
            .save_file(FileInput::new("notes.txt", None, b"first".to_vec()))
            .await
            .unwrap();
        let b = service
            .save_file(FileInput::new("notes.txt", None, b"second".to_vec()))
            .await
            .unwrap();

        assert_ne!(a.stored_filename, b.stored_filename);
        assert_ne!(a.path, b.path);
        assert_eq!(collect(service.download_by_code(&a.code).await.unwrap().body).await, b"first");
        assert_eq!(collect(service.download_by_code(&b.code).await.unwrap().body).await, b"second");
    }

    #[tokio::test]
    async fn test_download_with_missing_bytes_is_distinct() {
        let store = Arc::new(MemoryContentStore::default());
        let service = file_service(store.clone());

        let saved = service
            .save_file(FileInput::new("gone.bin", None, vec![1, 2, 3]))
            .await
            .unwrap();
        store.remove(&saved.path);

        let err = service.download_by_code(&saved.code).await.err().unwrap();
        assert!(matches!(err, AppError::MissingStoredFile(_)));

        // Metadata is still there.
        assert!(service.get_by_code(&saved.code).await.is_ok());
    }

    #[tokio::test]
    async fn test_download_unknown_code_is_invalid() {
        let service = file_service(Arc::new(MemoryContentStore::default()));
        let err = service.download_by_code("ZZZZZZ").await.err().unwrap();
        assert!(matches!(err, AppError::InvalidCode(_)));
    }

    #[tokio::test]
    async fn test_failed_write_persists_nothing() {
        let mut store = MockContentStore::new();
        store
            .expect_write()
            .returning(|_, _| Err(anyhow::anyhow!("No space left on device")));
        let mut repo = MockFileRepo::new();
        repo.expect_save_file().never();

        let service = FileShareService::new(Arc::new(repo), Arc::new(store), Arc::new(SeededCodes::new(4)));
        let err = service
            .save_file(FileInput::new("big.iso", None, vec![0; 16]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageWrite(_)));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_bytes_in_store() {
        let store = Arc::new(MemoryContentStore::default());
        let mut repo = MockFileRepo::new();
        repo.expect_save_file()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("UNIQUE constraint failed: shared_files.code")));

        let service = FileShareService::new(Arc::new(repo), store.clone(), Arc::new(SeededCodes::new(5)));
        let err = service
            .save_file(FileInput::new("a.txt", None, b"abc".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(store.len(), 1);
    }
}
