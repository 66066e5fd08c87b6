//! # fl-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `fl-core` domain models. Text and file records live in separate
//! tables with independent code namespaces.

use async_trait::async_trait;
use fl_core::models::{FileRecord, TextRecord};
use fl_core::traits::{FileRepo, TextRepo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS shared_texts (
        id BLOB PRIMARY KEY,
        code TEXT NOT NULL UNIQUE,
        content TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS shared_files (
        id BLOB PRIMARY KEY,
        code TEXT NOT NULL UNIQUE,
        original_filename TEXT NOT NULL,
        stored_filename TEXT NOT NULL,
        content_type TEXT,
        size INTEGER NOT NULL,
        path TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL
    )",
];

/// One pool serving both record kinds.
pub struct SqliteShareRepo {
    pool: SqlitePool,
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> Uuid {
    Uuid::from_slice(blob).unwrap_or_default()
}

impl SqliteShareRepo {
    /// Connects to `url` (e.g. `sqlite:flingo.db?mode=rwc` or `sqlite::memory:`)
    /// and creates the tables if they are missing.
    ///
    /// # Developer Note
    /// Every connection to `:memory:` opens its own empty database, so
    /// in-memory URLs get a single connection that is never recycled.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?;
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .connect_with(options.create_if_missing(true))
                .await?
        };

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        log::debug!("sqlite schema ready at {}", url);

        Ok(Self { pool })
    }
}

fn text_from_row(row: &SqliteRow) -> TextRecord {
    TextRecord {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        code: row.get("code"),
        content: row.get("content"),
        created_at: row.get("created_at"),
    }
}

fn file_from_row(row: &SqliteRow) -> FileRecord {
    FileRecord {
        id: blob_to_uuid(row.get::<Vec<u8>, _>("id").as_slice()),
        code: row.get("code"),
        original_filename: row.get("original_filename"),
        stored_filename: row.get("stored_filename"),
        content_type: row.get("content_type"),
        size: row.get("size"),
        path: row.get("path"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl TextRepo for SqliteShareRepo {
    /// A duplicate code fails on the UNIQUE constraint; no retry here.
    async fn save_text(&self, record: TextRecord) -> anyhow::Result<TextRecord> {
        sqlx::query("INSERT INTO shared_texts (id, code, content, created_at) VALUES (?, ?, ?, ?)")
            .bind(uuid_to_blob(record.id))
            .bind(&record.code)
            .bind(&record.content)
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_text_by_code(&self, code: &str) -> anyhow::Result<Option<TextRecord>> {
        let row = sqlx::query("SELECT id, code, content, created_at FROM shared_texts WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(text_from_row))
    }
}

#[async_trait]
impl FileRepo for SqliteShareRepo {
    async fn save_file(&self, record: FileRecord) -> anyhow::Result<FileRecord> {
        sqlx::query("INSERT INTO shared_files (id, code, original_filename, stored_filename, content_type, size, path, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)")
            .bind(uuid_to_blob(record.id))
            .bind(&record.code)
            .bind(&record.original_filename)
            .bind(&record.stored_filename)
            .bind(&record.content_type)
            .bind(record.size)
            .bind(&record.path)
            .bind(record.created_at)
            .execute(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_file_by_code(&self, code: &str) -> anyhow::Result<Option<FileRecord>> {
        let row = sqlx::query("SELECT * FROM shared_files WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(file_from_row))
    }
}
