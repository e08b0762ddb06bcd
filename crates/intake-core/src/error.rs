// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Intake capacity and queueing engine.

use thiserror::Error;

/// The primary error type used across collaborator traits and engine operations.
///
/// Pure evaluation code (business hours, capacity checks, agent selection)
/// never constructs these; only I/O boundaries do (queue storage, assignment
/// hand-off, notification delivery).
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Queue storage errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Agent directory errors (listing failed, tenant unknown).
    #[error("directory error: {message}")]
    Directory {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Assignment hand-off errors (external assignment store unavailable or rejected).
    #[error("assignment error: {message}")]
    Assignment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Notification delivery errors (customer-facing system message failed to send).
    #[error("notification error: {message}")]
    Notification {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
