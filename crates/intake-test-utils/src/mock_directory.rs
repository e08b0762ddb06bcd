// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock agent directory with a preset roster.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_core::IntakeError;
use intake_core::traits::AgentDirectory;
use intake_core::types::{Agent, AgentKind, AgentStatus, TenantId};

/// An agent directory serving a fixed in-memory roster.
///
/// `list_active_agents` applies the same status and kind filtering a real
/// directory would, so tests can seed inactive agents and expect them to be
/// invisible to the engine.
#[derive(Clone, Default)]
pub struct MockAgentDirectory {
    agents: Arc<Mutex<Vec<Agent>>>,
}

impl MockAgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self {
            agents: Arc::new(Mutex::new(agents)),
        }
    }

    /// Add an agent to the roster.
    pub async fn add_agent(&self, agent: Agent) {
        self.agents.lock().await.push(agent);
    }

    /// Replace the whole roster, e.g. to simulate a shift change mid-test.
    pub async fn set_agents(&self, agents: Vec<Agent>) {
        *self.agents.lock().await = agents;
    }
}

#[async_trait]
impl AgentDirectory for MockAgentDirectory {
    async fn list_active_agents(
        &self,
        _tenant: &TenantId,
        kind: Option<AgentKind>,
    ) -> Result<Vec<Agent>, IntakeError> {
        Ok(self
            .agents
            .lock()
            .await
            .iter()
            .filter(|a| a.status == AgentStatus::Active)
            .filter(|a| kind.is_none_or(|k| a.kind == k))
            .cloned()
            .collect())
    }
}
