// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assignment store trait: the external system of record for conversation
//! assignments.

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::types::{AgentId, ConversationId, TenantId};

/// External store owning the conversation-to-agent assignment table.
///
/// Agent load is never cached by the engine: it is re-derived through
/// [`count_active_conversations`](AssignmentStore::count_active_conversations)
/// immediately before every capacity decision, and the actual load increment
/// happens atomically inside [`assign`](AssignmentStore::assign).
#[async_trait]
pub trait AssignmentStore: Send + Sync + 'static {
    /// Number of open conversations currently assigned to the agent.
    async fn count_active_conversations(
        &self,
        agent: &AgentId,
        tenant: &TenantId,
    ) -> Result<u32, IntakeError>;

    /// Number of conversations the agent has handled in the current monthly
    /// quota period. Only consulted for AI agents with a quota.
    async fn count_monthly_conversations(
        &self,
        agent: &AgentId,
        tenant: &TenantId,
    ) -> Result<u32, IntakeError>;

    /// Hand a conversation off to the agent. On success the assignment record
    /// becomes authoritative and the queue store's ownership ends.
    async fn assign(
        &self,
        conversation: &ConversationId,
        agent: &AgentId,
    ) -> Result<(), IntakeError>;
}
