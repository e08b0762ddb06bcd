// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification trait for customer-facing system messages.

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::types::ConversationId;

/// Sends system messages into a conversation via the messaging transport.
///
/// Used to tell the customer their message is queued, with a human-readable
/// wait estimate. Raw errors are never surfaced to the customer.
#[async_trait]
pub trait NotificationSender: Send + Sync + 'static {
    async fn send_system_message(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), IntakeError>;
}
