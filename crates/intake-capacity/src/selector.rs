// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent selection over capacity-admitted candidates.
//!
//! Filters candidates through the [`CapacityEvaluator`], applies the
//! human-preference policy for configured intents, and load-balances by
//! utilization ratio with a stable id tie-break so selection is fully
//! deterministic for a given set of snapshots.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use intake_config::model::SelectionConfig;
use intake_core::types::{Agent, AgentKind};

use crate::evaluator::CapacityEvaluator;

/// An agent together with its load, derived fresh from the assignment store
/// immediately before selection. Never cached across calls.
#[derive(Debug, Clone)]
pub struct AgentSnapshot {
    pub agent: Agent,
    /// Open conversations currently assigned to the agent.
    pub current_load: u32,
    /// Conversations handled in the current monthly quota period (AI only).
    pub monthly_usage: u32,
}

impl AgentSnapshot {
    /// Utilization ratio `current_load / ceiling`, used for load balancing.
    pub fn utilization(&self, evaluator: &CapacityEvaluator) -> f64 {
        let ceiling = evaluator.ceiling(&self.agent).max(1);
        f64::from(self.current_load) / f64::from(ceiling)
    }
}

/// Ranks and picks the best available agent for a conversation.
#[derive(Debug, Clone)]
pub struct AgentSelector {
    prefer_human_intents: HashSet<String>,
}

impl AgentSelector {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            prefer_human_intents: config.prefer_human_intents.iter().cloned().collect(),
        }
    }

    /// Select the best agent for the conversation, or `None` if no candidate
    /// admits (the caller then enqueues).
    ///
    /// Policy: admitted candidates only; if the intent is in the
    /// prefer-human set and at least one admitted human exists, only humans
    /// are considered; the winner is the lowest utilization ratio, ties
    /// broken by agent id.
    pub fn select_best<'a>(
        &self,
        evaluator: &CapacityEvaluator,
        candidates: &'a [AgentSnapshot],
        intent_category: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<&'a AgentSnapshot> {
        let admitted: Vec<&AgentSnapshot> = candidates
            .iter()
            .filter(|snap| {
                evaluator
                    .check(&snap.agent, snap.current_load, snap.monthly_usage, now)
                    .admit
            })
            .collect();

        if admitted.is_empty() {
            debug!(candidates = candidates.len(), "no agent admits; caller should enqueue");
            return None;
        }

        let prefer_human = intent_category
            .is_some_and(|intent| self.prefer_human_intents.contains(intent));
        let pool: Vec<&AgentSnapshot> = if prefer_human
            && admitted.iter().any(|s| s.agent.kind == AgentKind::Human)
        {
            admitted
                .into_iter()
                .filter(|s| s.agent.kind == AgentKind::Human)
                .collect()
        } else {
            admitted
        };

        pool.into_iter().min_by(|a, b| {
            a.utilization(evaluator)
                .partial_cmp(&b.utilization(evaluator))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.agent.id.cmp(&b.agent.id))
        })
    }
}
