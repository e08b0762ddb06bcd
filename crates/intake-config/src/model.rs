// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Intake engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages. Every numeric
//! constant the engine consults (ceilings, backoff intervals, retry
//! estimates) lives here rather than in code paths.

use serde::{Deserialize, Serialize};

/// Top-level Intake configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Engine-wide settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Agent capacity defaults and retry-after estimates.
    #[serde(default)]
    pub capacity: CapacityConfig,

    /// Agent selection policy.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Queue processing and backoff settings.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Engine-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Agent capacity defaults and retry-after estimates.
///
/// Per-agent `max_concurrent` values from the directory take precedence;
/// these defaults apply when the directory record carries none.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CapacityConfig {
    /// Default concurrency ceiling for AI agents.
    #[serde(default = "default_ai_max_concurrent")]
    pub ai_max_concurrent: u32,

    /// Default concurrency ceiling for human agents.
    #[serde(default = "default_human_max_concurrent")]
    pub human_max_concurrent: u32,

    /// Retry-after estimate when an AI agent is at its concurrency limit.
    /// Short, since AI turnover is fast.
    #[serde(default = "default_ai_retry_secs")]
    pub ai_retry_secs: u64,

    /// Retry-after estimate when a human agent is at capacity and has no
    /// historical average response time on record.
    #[serde(default = "default_human_retry_secs")]
    pub human_retry_secs: u64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            ai_max_concurrent: default_ai_max_concurrent(),
            human_max_concurrent: default_human_max_concurrent(),
            ai_retry_secs: default_ai_retry_secs(),
            human_retry_secs: default_human_retry_secs(),
        }
    }
}

fn default_ai_max_concurrent() -> u32 {
    100
}

fn default_human_max_concurrent() -> u32 {
    5
}

fn default_ai_retry_secs() -> u64 {
    300 // 5 minutes
}

fn default_human_retry_secs() -> u64 {
    900 // 15 minutes
}

/// Agent selection policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionConfig {
    /// Intent categories for which an admitted human agent is preferred over
    /// AI agents, even at higher utilization.
    #[serde(default = "default_prefer_human_intents")]
    pub prefer_human_intents: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            prefer_human_intents: default_prefer_human_intents(),
        }
    }
}

fn default_prefer_human_intents() -> Vec<String> {
    vec!["support".to_string(), "complaint".to_string()]
}

/// Queue processing and backoff configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueueConfig {
    /// Base backoff interval in seconds; retry N waits `min(N * base, max)`.
    #[serde(default = "default_base_interval_secs")]
    pub base_interval_secs: u64,

    /// Upper bound on the backoff interval in seconds.
    #[serde(default = "default_max_interval_secs")]
    pub max_interval_secs: u64,

    /// Attempt ceiling; a message at this count transitions to `failed` and
    /// is reported to the escalation sink.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds after which a `processing` claim from a crashed run is
    /// released back to `queued`.
    #[serde(default = "default_claim_timeout_secs")]
    pub claim_timeout_secs: u64,

    /// Maximum messages claimed per processor run.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            base_interval_secs: default_base_interval_secs(),
            max_interval_secs: default_max_interval_secs(),
            max_attempts: default_max_attempts(),
            claim_timeout_secs: default_claim_timeout_secs(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_base_interval_secs() -> u64 {
    120 // 2 minutes
}

fn default_max_interval_secs() -> u64 {
    1800 // 30 minutes
}

fn default_max_attempts() -> u32 {
    10
}

fn default_claim_timeout_secs() -> u64 {
    300 // 5 minutes
}

fn default_batch_size() -> u32 {
    50
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("intake").join("intake.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("intake.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}
