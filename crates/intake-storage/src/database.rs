// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! Do NOT create additional Connection instances for writes: query modules
//! accept `&Database` and call through `connection().call()`.

use std::path::Path;

use intake_core::IntakeError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Handle to the queue database. Cloning shares the same underlying
/// connection (and its single writer thread).
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path` with WAL mode enabled,
    /// running any pending migrations.
    pub async fn open(path: &str) -> Result<Self, IntakeError> {
        Self::open_with(path, true).await
    }

    /// Open with an explicit journal-mode choice. `wal_mode = false` keeps
    /// SQLite's rollback journal, useful on filesystems without mmap support.
    pub async fn open_with(path: &str, wal_mode: bool) -> Result<Self, IntakeError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| IntakeError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        // Migrations run on a short-lived blocking connection before the
        // async handle is opened, so the schema is in place for every caller.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), IntakeError> {
            let mut conn =
                rusqlite::Connection::open(&migrate_path).map_err(|e| IntakeError::Storage {
                    source: Box::new(e),
                })?;
            if wal_mode {
                conn.pragma_update(None, "journal_mode", "WAL")
                    .map_err(|e| IntakeError::Storage {
                        source: Box::new(e),
                    })?;
            }
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| IntakeError::Internal(format!("migration task panicked: {e}")))??;

        let conn = Connection::open(path)
            .await
            .map_err(|e| IntakeError::Storage {
                source: Box::new(e),
            })?;

        // Journal mode persists in the file; the remaining PRAGMAs are
        // per-connection and must be set on the async handle.
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal_mode {
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Access the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the database, flushing the WAL.
    pub async fn close(self) -> Result<(), IntakeError> {
        self.conn.close().await.map_err(map_tr_err)
    }
}

/// Convert tokio-rusqlite errors into the storage error variant.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> IntakeError {
    IntakeError::Storage {
        source: Box::new(e),
    }
}
