// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capacity-aware assignment engine and queue processor.
//!
//! [`IntakeEngine`] handles the synchronous path: a new conversation arrives
//! and is either handed to an agent immediately or deferred to the durable
//! queue with a customer-facing explanation. [`QueueProcessor`] handles the
//! asynchronous path: a scheduler-driven tick that drains due queued messages
//! in priority order, retries with bounded backoff, and escalates messages
//! that exhaust their attempt budget.

pub mod engine;
pub mod processor;

pub use engine::{AssignOutcome, InboundConversation, IntakeEngine, QueueStatusReport};
pub use processor::{QueueProcessor, TickReport};
