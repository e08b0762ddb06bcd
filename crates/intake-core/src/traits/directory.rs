// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent directory trait: the external roster of agents per tenant.

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::types::{Agent, AgentKind, TenantId};

/// External roster of agents configured for a tenant.
#[async_trait]
pub trait AgentDirectory: Send + Sync + 'static {
    /// List agents with `status = active` for the tenant, optionally filtered
    /// by kind. Inactive agents are never candidates for assignment.
    async fn list_active_agents(
        &self,
        tenant: &TenantId,
        kind: Option<AgentKind>,
    ) -> Result<Vec<Agent>, IntakeError>;
}
