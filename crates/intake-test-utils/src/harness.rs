// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test harness helpers.

use intake_storage::Database;
use tempfile::TempDir;

/// Open a fresh migrated database in a temp directory.
///
/// The returned [`TempDir`] must be kept alive for the lifetime of the
/// database; dropping it deletes the backing file.
pub async fn open_temp_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("intake-test.db");
    let db = Database::open(db_path.to_str().expect("utf-8 temp path"))
        .await
        .expect("open test database");
    (db, dir)
}
