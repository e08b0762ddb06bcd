// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous intake path: immediate assignment or deferral to the queue.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use intake_capacity::{AgentSelector, AgentSnapshot, CapacityEvaluator};
use intake_config::model::IntakeConfig;
use intake_core::IntakeError;
use intake_core::traits::{AgentDirectory, AssignmentStore, NotificationSender};
use intake_core::types::{
    AgentId, AgentKind, BusinessHours, ConversationId, Priority, QueuedMessage, SenderInfo,
    TenantId,
};
use intake_hours::HoursVerdict;
use intake_storage::{Database, NewQueuedMessage, queries};

/// A conversation arriving from the messaging layer, already classified
/// upstream (intent and priority come from the classifier, not from here).
#[derive(Debug, Clone)]
pub struct InboundConversation {
    pub tenant_id: TenantId,
    pub conversation_id: ConversationId,
    pub platform: String,
    pub content: String,
    pub sender_info: SenderInfo,
    pub intent_category: Option<String>,
    pub priority: Priority,
    /// Stable key from the webhook layer for duplicate-delivery protection.
    pub dedupe_key: Option<String>,
}

/// Result of an immediate-assignment attempt.
#[derive(Debug, Clone)]
pub enum AssignOutcome {
    /// Handed to this agent; the assignment store is now authoritative.
    Assigned(AgentId),
    /// Deferred to the durable queue.
    Queued(QueuedMessage),
}

/// Read-only queue view for dashboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStatusReport {
    pub queue_length: u32,
    pub oldest_queued_at: Option<DateTime<Utc>>,
    /// Best-effort minutes until the next waiting message could be picked up.
    pub estimated_wait_minutes: Option<u64>,
}

/// The capacity-aware assignment engine.
///
/// Holds no per-conversation state: agent load is re-derived from the
/// assignment store on every decision, and deferred messages live in the
/// durable queue. All entry points take `now` explicitly so behavior is
/// reproducible in tests.
#[derive(Clone)]
pub struct IntakeEngine {
    pub(crate) db: Database,
    pub(crate) config: IntakeConfig,
    pub(crate) evaluator: CapacityEvaluator,
    pub(crate) selector: AgentSelector,
    pub(crate) assignments: Arc<dyn AssignmentStore>,
    pub(crate) directory: Arc<dyn AgentDirectory>,
    pub(crate) notifier: Arc<dyn NotificationSender>,
}

impl IntakeEngine {
    pub fn new(
        db: Database,
        config: IntakeConfig,
        assignments: Arc<dyn AssignmentStore>,
        directory: Arc<dyn AgentDirectory>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        let evaluator = CapacityEvaluator::new(config.capacity.clone());
        let selector = AgentSelector::new(&config.selection);
        Self {
            db,
            config,
            evaluator,
            selector,
            assignments,
            directory,
            notifier,
        }
    }

    /// Try to hand the conversation to an agent right now; defer it to the
    /// queue otherwise.
    ///
    /// Outside the tenant's business hours the conversation is deferred
    /// without consulting any agent, with reprocessing scheduled for the next
    /// window start. Within hours, the best admitted agent (if any) receives
    /// the hand-off; when nobody admits, or the hand-off itself fails
    /// transiently, the conversation is deferred due immediately, so the
    /// next processor tick re-checks capacity the moment an agent frees up.
    /// The shortest retry hint any rejection offered only shapes the
    /// customer-facing wait estimate.
    ///
    /// The customer is told about any deferral via the notification sender;
    /// notification failures are logged and never surfaced.
    pub async fn try_immediate_assign(
        &self,
        request: InboundConversation,
        hours: Option<&BusinessHours>,
        now: DateTime<Utc>,
    ) -> Result<AssignOutcome, IntakeError> {
        let verdict = intake_hours::evaluate(hours, now);
        if !verdict.in_window {
            let estimated = verdict.next_window_start.unwrap_or(now);
            let msg = self.defer(request, estimated, now).await?;
            self.notify(&msg.conversation_id, &closed_text(hours, &verdict))
                .await;
            info!(
                tenant = %msg.tenant_id,
                message = %msg.id,
                reason = verdict.reason,
                "deferred outside business hours"
            );
            return Ok(AssignOutcome::Queued(msg));
        }

        let snapshots = self.snapshot_agents(&request.tenant_id).await?;
        if let Some(best) = self.selector.select_best(
            &self.evaluator,
            &snapshots,
            request.intent_category.as_deref(),
            now,
        ) {
            let agent_id = best.agent.id.clone();
            match self
                .assignments
                .assign(&request.conversation_id, &agent_id)
                .await
            {
                Ok(()) => {
                    info!(
                        tenant = %request.tenant_id,
                        conversation = %request.conversation_id,
                        agent = %agent_id,
                        "conversation assigned"
                    );
                    return Ok(AssignOutcome::Assigned(agent_id));
                }
                Err(e) => {
                    // Transient hand-off failure: defer instead of bubbling
                    // the raw error to the webhook layer.
                    warn!(
                        conversation = %request.conversation_id,
                        agent = %agent_id,
                        error = %e,
                        "hand-off failed, deferring to queue"
                    );
                }
            }
        }

        // Capacity deferrals are due at the enqueue instant; only hours
        // deferrals carry a future estimated_process_at.
        let retry_secs = self.shortest_retry_secs(&snapshots, now);
        let msg = self.defer(request, now, now).await?;
        self.notify(&msg.conversation_id, &busy_text(retry_secs)).await;
        info!(
            tenant = %msg.tenant_id,
            message = %msg.id,
            retry_secs,
            "deferred at capacity"
        );
        Ok(AssignOutcome::Queued(msg))
    }

    /// Read-only queue status for the tenant.
    pub async fn queue_status(
        &self,
        tenant: &TenantId,
        now: DateTime<Utc>,
    ) -> Result<QueueStatusReport, IntakeError> {
        let depth = queries::queue::queue_status(&self.db, tenant).await?;
        let estimated_wait_minutes = depth.next_due.map(|due| {
            if due > now {
                ((due - now).num_seconds() as u64).div_ceil(60)
            } else {
                // Already due: bounded by the scheduler interval.
                self.config.queue.base_interval_secs.div_ceil(60).max(1)
            }
        });
        Ok(QueueStatusReport {
            queue_length: depth.waiting,
            oldest_queued_at: depth.oldest_queued_at,
            estimated_wait_minutes,
        })
    }

    /// Load + quota snapshots for every active agent, taken fresh from the
    /// assignment store.
    pub(crate) async fn snapshot_agents(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<AgentSnapshot>, IntakeError> {
        let agents = self.directory.list_active_agents(tenant, None).await?;
        let mut snapshots = Vec::with_capacity(agents.len());
        for agent in agents {
            let current_load = self
                .assignments
                .count_active_conversations(&agent.id, tenant)
                .await?;
            let monthly_usage = if agent.kind == AgentKind::Ai && agent.monthly_quota.is_some() {
                self.assignments
                    .count_monthly_conversations(&agent.id, tenant)
                    .await?
            } else {
                0
            };
            snapshots.push(AgentSnapshot {
                agent,
                current_load,
                monthly_usage,
            });
        }
        Ok(snapshots)
    }

    /// Shortest retry hint across all rejections, falling back to the base
    /// scheduler interval when nobody offered one.
    fn shortest_retry_secs(&self, snapshots: &[AgentSnapshot], now: DateTime<Utc>) -> u64 {
        snapshots
            .iter()
            .filter_map(|s| {
                self.evaluator
                    .check(&s.agent, s.current_load, s.monthly_usage, now)
                    .retry_after
            })
            .map(|d| d.as_secs())
            .min()
            .unwrap_or(self.config.queue.base_interval_secs)
    }

    async fn defer(
        &self,
        request: InboundConversation,
        estimated_process_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<QueuedMessage, IntakeError> {
        queries::queue::enqueue(
            &self.db,
            NewQueuedMessage {
                tenant_id: request.tenant_id,
                conversation_id: request.conversation_id,
                platform: request.platform,
                content: request.content,
                sender_info: request.sender_info,
                intent_category: request.intent_category,
                priority: request.priority,
                queued_at: now,
                estimated_process_at,
                dedupe_key: request.dedupe_key,
            },
        )
        .await
    }

    async fn notify(&self, conversation: &ConversationId, text: &str) {
        if let Err(e) = self.notifier.send_system_message(conversation, text).await {
            warn!(conversation = %conversation, error = %e, "queue notification failed");
        }
    }
}

/// Customer-facing text for an out-of-hours deferral. Times are rendered in
/// the tenant's own timezone.
fn closed_text(hours: Option<&BusinessHours>, verdict: &HoursVerdict) -> String {
    match (hours, verdict.next_window_start) {
        (Some(h), Some(start)) => {
            let local = start.with_timezone(&h.timezone);
            format!(
                "Thanks for reaching out! We're currently closed. \
                 We'll get back to you when we reopen on {}.",
                local.format("%A at %H:%M")
            )
        }
        _ => "Thanks for reaching out! We're currently closed and will get back \
              to you as soon as we reopen."
            .to_string(),
    }
}

/// Customer-facing text for a capacity deferral.
fn busy_text(retry_secs: u64) -> String {
    let minutes = retry_secs.div_ceil(60).max(1);
    format!(
        "All of our agents are helping other customers right now. \
         We expect to get back to you in about {minutes} minute{}.",
        if minutes == 1 { "" } else { "s" }
    )
}
