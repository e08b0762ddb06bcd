// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions for the Intake engine.
//!
//! The engine only *decides*; ownership of conversations, agent rosters, and
//! customer messaging lives behind these narrow seams. All traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod assignment;
pub mod directory;
pub mod escalation;
pub mod notification;

// Re-export all traits at the traits module level for convenience.
pub use assignment::AssignmentStore;
pub use directory::AgentDirectory;
pub use escalation::EscalationSink;
pub use notification::NotificationSender;
