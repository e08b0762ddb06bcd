// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types used across the Intake engine and its collaborator traits.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a tenant (workspace) on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

/// Unique identifier for an agent (AI or human).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Unique identifier for a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

/// Unique identifier for a queued message (UUID v4, assigned by the queue store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an agent is an AI responder or a human operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Ai,
    Human,
}

/// Whether an agent is eligible for new conversations at all.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
}

/// Queued message priority. Higher priorities are always claimed first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank used for ordering (higher claims first).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        }
    }
}

/// Lifecycle state of a queued message.
///
/// Legal transitions: `Queued -> Processing -> {Processed | Queued | Failed}`.
/// `Processed` and `Failed` are terminal; rows are kept for audit, never deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueueState {
    Queued,
    Processing,
    Processed,
    Failed,
}

impl QueueState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QueueState::Processed | QueueState::Failed)
    }
}

/// A recurring weekly availability window in a named timezone.
///
/// Used both for a tenant's business hours and for a human agent's working
/// hours. `days` holds weekday indices 0-6 with 0 = Sunday, matching the
/// convention the upstream tenant configs were written against. An absent
/// config means always-available; degenerate configs (empty `days`,
/// `start > end`) are treated as always-open rather than blocking intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// Local opening time, e.g. "09:00".
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Local closing time (inclusive), e.g. "17:00".
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// IANA timezone name, e.g. "Europe/Berlin".
    pub timezone: chrono_tz::Tz,
    /// Weekday indices the window applies to (0 = Sunday .. 6 = Saturday).
    pub days: Vec<u8>,
}

/// Serde helper for "HH:MM" time-of-day strings (seconds optional on input).
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(de)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

/// An agent record as reported by the external agent directory.
///
/// `max_concurrent` is optional; when absent the engine substitutes the
/// configured default for the agent's kind. Load is never stored here; it
/// is always derived fresh from the assignment store before a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub kind: AgentKind,
    pub status: AgentStatus,
    /// Hard ceiling on simultaneous open conversations.
    #[serde(default)]
    pub max_concurrent: Option<u32>,
    /// Working hours for human agents; `None` means always-available.
    #[serde(default)]
    pub working_hours: Option<BusinessHours>,
    /// Monthly conversation cap for AI agents; reset externally.
    #[serde(default)]
    pub monthly_quota: Option<u32>,
    /// Historical average response time in seconds (human agents), used as
    /// the retry-after estimate when the agent is at capacity.
    #[serde(default)]
    pub avg_response_secs: Option<u64>,
}

/// Who sent the inbound customer message, as reported by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SenderInfo {
    /// Platform-scoped identifier of the sender.
    pub platform_user_id: String,
    /// Display name, if the platform provides one.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A customer message whose processing has been deferred pending capacity or
/// business-hours availability.
///
/// Owned exclusively by the queue store until handed to the external
/// assignment collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedMessage {
    pub id: MessageId,
    pub tenant_id: TenantId,
    pub conversation_id: ConversationId,
    /// Source platform ("whatsapp", "discord", ...). Opaque to the engine.
    pub platform: String,
    pub content: String,
    pub sender_info: SenderInfo,
    pub intent_category: Option<String>,
    pub priority: Priority,
    pub state: QueueState,
    /// Failed reprocessing attempts so far.
    pub attempts: u32,
    pub queued_at: DateTime<Utc>,
    /// Earliest time reprocessing should occur.
    pub estimated_process_at: DateTime<Utc>,
    /// Set while `Processing`; used for stale-claim recovery.
    pub claimed_at: Option<DateTime<Utc>>,
    /// Caller-supplied idempotency key for webhook redelivery protection.
    pub dedupe_key: Option<String>,
}
