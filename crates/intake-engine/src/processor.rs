// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduler-driven queue draining with bounded retry and escalation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use intake_core::IntakeError;
use intake_core::traits::EscalationSink;
use intake_core::types::{BusinessHours, QueueState, QueuedMessage, TenantId};
use intake_storage::queries;

use crate::engine::IntakeEngine;

/// Outcome counters for one processor tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// True when the tenant was outside business hours and nothing ran.
    pub skipped_outside_hours: bool,
    /// Stale claims from crashed runs returned to the queue.
    pub released_stale: u32,
    pub claimed: u32,
    pub assigned: u32,
    pub retried: u32,
    pub failed: u32,
    /// Messages whose handling errored; left claimed for stale release.
    pub errored: u32,
}

enum Disposition {
    Assigned,
    Retried,
    Failed,
}

/// Drains a tenant's due messages on each external scheduler tick.
///
/// The caller guarantees no overlapping ticks per tenant; ticks for
/// different tenants may run concurrently, which the transaction-scoped
/// claim in the queue store makes safe.
pub struct QueueProcessor {
    engine: IntakeEngine,
    escalation: Arc<dyn EscalationSink>,
}

impl QueueProcessor {
    pub fn new(engine: IntakeEngine, escalation: Arc<dyn EscalationSink>) -> Self {
        Self { engine, escalation }
    }

    /// Run one tick for the tenant.
    ///
    /// Outside business hours this is a no-op: no stale release, no claims,
    /// no assignment attempts. Within hours, stale claims are released
    /// first, then one batch of due messages is claimed and each message is
    /// assigned, retried with backoff, or failed-and-escalated. A failure on
    /// one message never aborts the rest of the batch.
    pub async fn run_tick(
        &self,
        tenant: &TenantId,
        hours: Option<&BusinessHours>,
        now: DateTime<Utc>,
    ) -> Result<TickReport, IntakeError> {
        let verdict = intake_hours::evaluate(hours, now);
        if !verdict.in_window {
            debug!(tenant = %tenant, reason = verdict.reason, "tick skipped outside business hours");
            return Ok(TickReport {
                skipped_outside_hours: true,
                ..TickReport::default()
            });
        }

        let queue_cfg = &self.engine.config.queue;
        let released_stale = queries::queue::release_stale(
            &self.engine.db,
            tenant,
            now,
            queue_cfg.claim_timeout_secs,
        )
        .await?;

        let batch =
            queries::queue::dequeue_due(&self.engine.db, tenant, now, queue_cfg.batch_size).await?;
        let mut report = TickReport {
            released_stale,
            claimed: batch.len() as u32,
            ..TickReport::default()
        };

        for msg in batch {
            match self.process_one(tenant, &msg, now).await {
                Ok(Disposition::Assigned) => report.assigned += 1,
                Ok(Disposition::Retried) => report.retried += 1,
                Ok(Disposition::Failed) => report.failed += 1,
                Err(e) => {
                    // Leave the row claimed; the stale-claim release on a
                    // later tick will return it to the queue.
                    warn!(message = %msg.id, error = %e, "message handling errored");
                    report.errored += 1;
                }
            }
        }

        if report.claimed > 0 {
            info!(
                tenant = %tenant,
                claimed = report.claimed,
                assigned = report.assigned,
                retried = report.retried,
                failed = report.failed,
                "processor tick complete"
            );
        }
        Ok(report)
    }

    async fn process_one(
        &self,
        tenant: &TenantId,
        msg: &QueuedMessage,
        now: DateTime<Utc>,
    ) -> Result<Disposition, IntakeError> {
        let queue_cfg = &self.engine.config.queue;

        if msg.attempts >= queue_cfg.max_attempts {
            queries::queue::mark_failed(&self.engine.db, &msg.id, now).await?;
            let mut failed = msg.clone();
            failed.state = QueueState::Failed;
            failed.claimed_at = None;
            if let Err(e) = self.escalation.report_failed_message(&failed).await {
                // The row is already failed and kept for audit; a sink
                // outage must not undo that.
                warn!(message = %msg.id, error = %e, "escalation report failed");
            }
            warn!(
                message = %msg.id,
                attempts = msg.attempts,
                "retry budget exhausted, message failed"
            );
            return Ok(Disposition::Failed);
        }

        let snapshots = self.engine.snapshot_agents(tenant).await?;
        if let Some(best) = self.engine.selector.select_best(
            &self.engine.evaluator,
            &snapshots,
            msg.intent_category.as_deref(),
            now,
        ) {
            let agent_id = best.agent.id.clone();
            match self
                .engine
                .assignments
                .assign(&msg.conversation_id, &agent_id)
                .await
            {
                Ok(()) => {
                    queries::queue::mark_processed(&self.engine.db, &msg.id, now).await?;
                    info!(message = %msg.id, agent = %agent_id, "queued message assigned");
                    return Ok(Disposition::Assigned);
                }
                Err(e) => {
                    warn!(message = %msg.id, agent = %agent_id, error = %e, "hand-off failed");
                }
            }
        }

        let next = now + chrono::Duration::seconds(self.backoff_secs(msg.attempts + 1) as i64);
        queries::queue::mark_retry(&self.engine.db, &msg.id, next, now).await?;
        debug!(message = %msg.id, attempts = msg.attempts + 1, next = %next, "message requeued");
        Ok(Disposition::Retried)
    }

    /// Bounded linear backoff: `min(attempt * base, max)`.
    fn backoff_secs(&self, attempt: u32) -> u64 {
        let queue_cfg = &self.engine.config.queue;
        (u64::from(attempt) * queue_cfg.base_interval_secs).min(queue_cfg.max_interval_secs)
    }
}
