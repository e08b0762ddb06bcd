// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capacity evaluation and agent selection.
//!
//! Two pure decision components: [`CapacityEvaluator`] gates a single agent
//! ("can this agent take one more conversation right now?"), and
//! [`AgentSelector`] ranks the admitted candidates for a conversation.
//! Neither mutates state or performs I/O; callers derive loads fresh from
//! the assignment store before every call.

mod evaluator;
mod selector;

pub use evaluator::{Admission, AdmissionReason, CapacityEvaluator};
pub use selector::{AgentSelector, AgentSnapshot};
