// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kind-dispatched admission decisions.
//!
//! AI agents have soft, usage-based limits (concurrency + monthly quota);
//! human agents have hard concurrency and working-hours limits. Both are
//! dispatched through a single [`CapacityEvaluator::check`] so call sites
//! never branch on agent kind themselves.

use std::time::Duration;

use chrono::{DateTime, Utc};

use intake_config::model::CapacityConfig;
use intake_core::types::{Agent, AgentKind, AgentStatus};

/// Why an admission decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionReason {
    /// The agent can take the conversation now.
    Admitted,
    /// The agent is inactive or offline.
    Inactive,
    /// Human agent outside their working-hours window.
    OutsideWorkingHours,
    /// Human agent at their concurrency ceiling.
    AtCapacity,
    /// AI agent at its concurrency ceiling.
    ConcurrencyLimit,
    /// AI agent's monthly quota is exhausted; requires external reset.
    QuotaExhausted,
}

impl std::fmt::Display for AdmissionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AdmissionReason::Admitted => "admitted",
            AdmissionReason::Inactive => "inactive/offline",
            AdmissionReason::OutsideWorkingHours => "outside working hours",
            AdmissionReason::AtCapacity => "at capacity",
            AdmissionReason::ConcurrencyLimit => "concurrency limit",
            AdmissionReason::QuotaExhausted => "quota exhausted",
        };
        f.write_str(s)
    }
}

/// Result of a capacity check for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    /// Whether the agent may accept one more conversation.
    pub admit: bool,
    pub reason: AdmissionReason,
    /// Best-effort estimate of when a retry could succeed. `None` for
    /// admissions and for quota exhaustion (which needs an external reset).
    pub retry_after: Option<Duration>,
}

impl Admission {
    fn admit() -> Self {
        Self {
            admit: true,
            reason: AdmissionReason::Admitted,
            retry_after: None,
        }
    }

    fn reject(reason: AdmissionReason, retry_after: Option<Duration>) -> Self {
        Self {
            admit: false,
            reason,
            retry_after,
        }
    }
}

/// Decides whether an agent can accept one more conversation right now.
///
/// Pure: never mutates state. Callers are responsible for re-deriving
/// `current_load` (and `monthly_usage` for AI agents) fresh from the
/// assignment store immediately before each call.
#[derive(Debug, Clone)]
pub struct CapacityEvaluator {
    config: CapacityConfig,
}

impl CapacityEvaluator {
    pub fn new(config: CapacityConfig) -> Self {
        Self { config }
    }

    /// Effective concurrency ceiling for the agent: its own `max_concurrent`
    /// when set, else the configured default for its kind.
    pub fn ceiling(&self, agent: &Agent) -> u32 {
        agent.max_concurrent.unwrap_or(match agent.kind {
            AgentKind::Ai => self.config.ai_max_concurrent,
            AgentKind::Human => self.config.human_max_concurrent,
        })
    }

    /// Check whether the agent can accept one more conversation at `now`.
    pub fn check(
        &self,
        agent: &Agent,
        current_load: u32,
        monthly_usage: u32,
        now: DateTime<Utc>,
    ) -> Admission {
        if agent.status != AgentStatus::Active {
            return Admission::reject(AdmissionReason::Inactive, None);
        }

        match agent.kind {
            AgentKind::Human => self.check_human(agent, current_load, now),
            AgentKind::Ai => self.check_ai(agent, current_load, monthly_usage),
        }
    }

    fn check_human(&self, agent: &Agent, current_load: u32, now: DateTime<Utc>) -> Admission {
        let verdict = intake_hours::evaluate(agent.working_hours.as_ref(), now);
        if !verdict.in_window {
            let retry_after = verdict
                .next_window_start
                .and_then(|start| (start - now).to_std().ok());
            return Admission::reject(AdmissionReason::OutsideWorkingHours, retry_after);
        }

        if current_load >= self.ceiling(agent) {
            // Retry estimate: the agent's historical average response time,
            // falling back to the configured default.
            let secs = agent.avg_response_secs.unwrap_or(self.config.human_retry_secs);
            return Admission::reject(
                AdmissionReason::AtCapacity,
                Some(Duration::from_secs(secs)),
            );
        }

        Admission::admit()
    }

    fn check_ai(&self, agent: &Agent, current_load: u32, monthly_usage: u32) -> Admission {
        if current_load >= self.ceiling(agent) {
            return Admission::reject(
                AdmissionReason::ConcurrencyLimit,
                Some(Duration::from_secs(self.config.ai_retry_secs)),
            );
        }

        if agent.monthly_quota.is_some_and(|quota| monthly_usage >= quota) {
            // No retry estimate: the quota resets on an external period boundary.
            return Admission::reject(AdmissionReason::QuotaExhausted, None);
        }

        Admission::admit()
    }
}
