//! # fl-storage-local
//! flingo/crates/fl-plugins/fl-storage-local/src/lib.rs
//! Local filesystem implementation of `ContentStore`.
//! Uploads land flat in one root directory under their stored filename.

use async_trait::async_trait;
use fl_core::traits::{ByteStream, ContentStore};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

pub struct LocalContentStore {
    /// Absolute root directory for all uploads (e.g., "/srv/flingo/uploads")
    root_path: PathBuf,
}

impl LocalContentStore {
    /// Relative roots are resolved against the current working directory.
    /// The directory itself is created lazily on first write.
    pub fn new(root: impl AsRef<Path>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let root_path = if root.is_absolute() {
            root.to_path_buf()
        } else {
            std::env::current_dir()?.join(root)
        };
        Ok(Self { root_path })
    }

    /// Stored names are single path components; anything else could
    /// land outside the root.
    fn target_path(&self, stored_filename: &str) -> anyhow::Result<PathBuf> {
        let mut components = Path::new(stored_filename).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => Ok(self.root_path.join(stored_filename)),
            _ => anyhow::bail!("invalid stored filename {:?}", stored_filename),
        }
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn write(&self, stored_filename: &str, data: Vec<u8>) -> anyhow::Result<String> {
        let target_path = self.target_path(stored_filename)?;

        // 1. Ensure directory exists
        fs::create_dir_all(&self.root_path).await?;

        // 2. Write and flush to disk
        let mut file = fs::File::create(&target_path).await?;
        file.write_all(&data).await?;
        file.sync_all().await?;

        log::debug!("wrote {} bytes to {}", data.len(), target_path.display());
        Ok(target_path.to_string_lossy().into_owned())
    }

    async fn open(&self, path: &str) -> anyhow::Result<Option<ByteStream>> {
        match fs::File::open(path).await {
            Ok(file) => Ok(Some(Box::pin(ReaderStream::new(file)))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn root(&self) -> PathBuf {
        self.root_path.clone()
    }
}
