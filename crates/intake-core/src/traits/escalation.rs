// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation sink trait for permanently failed messages.

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::types::QueuedMessage;

/// Receives messages that exhausted their retry budget.
///
/// A message is reported here exactly once, when it transitions to
/// `Failed`. It is never silently dropped: the queue row is kept for audit
/// and ops review happens through this sink.
#[async_trait]
pub trait EscalationSink: Send + Sync + 'static {
    async fn report_failed_message(&self, message: &QueuedMessage) -> Result<(), IntakeError>;
}
