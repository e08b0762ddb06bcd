// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock assignment store with in-memory counters and an assignment log.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_core::IntakeError;
use intake_core::traits::AssignmentStore;
use intake_core::types::{AgentId, ConversationId, TenantId};

#[derive(Default)]
struct Inner {
    active: HashMap<AgentId, u32>,
    monthly: HashMap<AgentId, u32>,
    assignments: Vec<(ConversationId, AgentId)>,
    fail_assigns: bool,
}

/// An assignment store backed by in-memory counters.
///
/// Successful `assign` calls increment the agent's active and monthly
/// counters, mirroring how a real assignment table changes load. Set
/// `fail_assigns` to simulate a downstream outage.
#[derive(Clone, Default)]
pub struct MockAssignmentStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-set an agent's active conversation count.
    pub async fn set_active(&self, agent: &AgentId, count: u32) {
        self.inner.lock().await.active.insert(agent.clone(), count);
    }

    /// Pre-set an agent's monthly handled-conversation count.
    pub async fn set_monthly(&self, agent: &AgentId, count: u32) {
        self.inner.lock().await.monthly.insert(agent.clone(), count);
    }

    /// Make every subsequent `assign` call fail.
    pub async fn fail_assigns(&self, fail: bool) {
        self.inner.lock().await.fail_assigns = fail;
    }

    /// All successful assignments, in call order.
    pub async fn assignments(&self) -> Vec<(ConversationId, AgentId)> {
        self.inner.lock().await.assignments.clone()
    }
}

#[async_trait]
impl AssignmentStore for MockAssignmentStore {
    async fn count_active_conversations(
        &self,
        agent: &AgentId,
        _tenant: &TenantId,
    ) -> Result<u32, IntakeError> {
        Ok(self
            .inner
            .lock()
            .await
            .active
            .get(agent)
            .copied()
            .unwrap_or(0))
    }

    async fn count_monthly_conversations(
        &self,
        agent: &AgentId,
        _tenant: &TenantId,
    ) -> Result<u32, IntakeError> {
        Ok(self
            .inner
            .lock()
            .await
            .monthly
            .get(agent)
            .copied()
            .unwrap_or(0))
    }

    async fn assign(
        &self,
        conversation: &ConversationId,
        agent: &AgentId,
    ) -> Result<(), IntakeError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_assigns {
            return Err(IntakeError::Assignment {
                message: "simulated assignment outage".to_string(),
                source: None,
            });
        }
        *inner.active.entry(agent.clone()).or_insert(0) += 1;
        *inner.monthly.entry(agent.clone()).or_insert(0) += 1;
        inner
            .assignments
            .push((conversation.clone(), agent.clone()));
        Ok(())
    }
}
