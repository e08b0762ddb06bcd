// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./intake.toml` > `~/.config/intake/intake.toml` >
//! `/etc/intake/intake.toml` with environment variable overrides via the
//! `INTAKE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::IntakeConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/intake/intake.toml` (system-wide)
/// 3. `~/.config/intake/intake.toml` (user XDG config)
/// 4. `./intake.toml` (local directory)
/// 5. `INTAKE_*` environment variables
pub fn load_config() -> Result<IntakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IntakeConfig::default()))
        .merge(Toml::file("/etc/intake/intake.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("intake/intake.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("intake.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<IntakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IntakeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<IntakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IntakeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `INTAKE_QUEUE_MAX_ATTEMPTS` must map to
/// `queue.max_attempts`, not `queue.max.attempts`.
fn env_provider() -> Env {
    Env::prefixed("INTAKE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: INTAKE_QUEUE_MAX_ATTEMPTS -> "queue_max_attempts"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("engine_", "engine.", 1)
            .replacen("capacity_", "capacity.", 1)
            .replacen("selection_", "selection.", 1)
            .replacen("queue_", "queue.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
