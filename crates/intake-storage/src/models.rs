// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical queue types live in `intake-core::types` for use across
//! collaborator boundaries; this module re-exports them and defines the
//! storage-local insert payload.

use chrono::{DateTime, Utc};

pub use intake_core::types::{
    ConversationId, MessageId, Priority, QueueState, QueuedMessage, SenderInfo, TenantId,
};

/// Aggregate view of a tenant's waiting messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDepth {
    /// Rows currently in the `queued` state.
    pub waiting: u32,
    /// Enqueue time of the oldest waiting message.
    pub oldest_queued_at: Option<DateTime<Utc>>,
    /// Earliest `estimated_process_at` among waiting messages.
    pub next_due: Option<DateTime<Utc>>,
}

/// Payload for enqueueing a new deferred message. The store assigns the id,
/// initial state, and attempt counter.
#[derive(Debug, Clone)]
pub struct NewQueuedMessage {
    pub tenant_id: TenantId,
    pub conversation_id: ConversationId,
    pub platform: String,
    pub content: String,
    pub sender_info: SenderInfo,
    pub intent_category: Option<String>,
    pub priority: Priority,
    pub queued_at: DateTime<Utc>,
    /// Earliest time reprocessing should occur (next window start, or the
    /// enqueue instant when the cause was pure capacity exhaustion).
    pub estimated_process_at: DateTime<Utc>,
    /// Caller-supplied idempotency key; the engine exposes the hook but
    /// never invents one.
    pub dedupe_key: Option<String>,
}
