// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Intake integration tests.
//!
//! Provides recording mock implementations of the collaborator traits and a
//! temp-database harness for fast, deterministic, CI-runnable tests without
//! external services.
//!
//! # Components
//!
//! - [`MockAssignmentStore`] - in-memory load/quota counters with an assignment log
//! - [`MockAgentDirectory`] - preset agent roster per tenant
//! - [`MockNotificationSender`] - captures customer-facing system messages
//! - [`MockEscalationSink`] - captures permanently failed messages

pub mod harness;
pub mod mock_assignment;
pub mod mock_directory;
pub mod mock_escalation;
pub mod mock_notification;

pub use harness::open_temp_db;
pub use mock_assignment::MockAssignmentStore;
pub use mock_directory::MockAgentDirectory;
pub use mock_escalation::MockEscalationSink;
pub use mock_notification::MockNotificationSender;
