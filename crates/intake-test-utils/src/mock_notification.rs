// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock notification sender that captures outgoing system messages.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_core::IntakeError;
use intake_core::traits::NotificationSender;
use intake_core::types::ConversationId;

/// Captures every system message the engine tries to send.
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    sent: Arc<Mutex<Vec<(ConversationId, String)>>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured messages, in send order.
    pub async fn sent(&self) -> Vec<(ConversationId, String)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_system_message(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), IntakeError> {
        self.sent
            .lock()
            .await
            .push((conversation.clone(), text.to_string()));
        Ok(())
    }
}
