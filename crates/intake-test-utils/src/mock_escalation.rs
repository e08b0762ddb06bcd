// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock escalation sink that captures permanently failed messages.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_core::IntakeError;
use intake_core::traits::EscalationSink;
use intake_core::types::QueuedMessage;

/// Captures every message reported as permanently failed.
#[derive(Clone, Default)]
pub struct MockEscalationSink {
    reported: Arc<Mutex<Vec<QueuedMessage>>>,
}

impl MockEscalationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All escalated messages, in report order.
    pub async fn reported(&self) -> Vec<QueuedMessage> {
        self.reported.lock().await.clone()
    }
}

#[async_trait]
impl EscalationSink for MockEscalationSink {
    async fn report_failed_message(&self, message: &QueuedMessage) -> Result<(), IntakeError> {
        self.reported.lock().await.push(message.clone());
        Ok(())
    }
}
