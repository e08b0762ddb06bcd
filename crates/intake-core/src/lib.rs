// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Intake capacity and queueing engine.
//!
//! This crate provides the error type, domain types, and collaborator trait
//! definitions used throughout the Intake workspace. The engine consumes the
//! broader messaging platform only through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::IntakeError;
pub use types::{
    Agent, AgentId, AgentKind, AgentStatus, BusinessHours, ConversationId, MessageId, Priority,
    QueueState, QueuedMessage, SenderInfo, TenantId,
};

// Re-export all collaborator traits at crate root.
pub use traits::{AgentDirectory, AssignmentStore, EscalationSink, NotificationSender};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intake_error_has_all_variants() {
        let _config = IntakeError::Config("test".into());
        let _storage = IntakeError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _directory = IntakeError::Directory {
            message: "test".into(),
            source: None,
        };
        let _assignment = IntakeError::Assignment {
            message: "test".into(),
            source: None,
        };
        let _notification = IntakeError::Notification {
            message: "test".into(),
            source: None,
        };
        let _internal = IntakeError::Internal("test".into());
    }

    #[test]
    fn all_collaborator_traits_are_exported() {
        // If any trait module is missing or broken, this won't compile.
        fn _assert_assignment<T: AssignmentStore>() {}
        fn _assert_directory<T: AgentDirectory>() {}
        fn _assert_notification<T: NotificationSender>() {}
        fn _assert_escalation<T: EscalationSink>() {}
    }

    #[test]
    fn error_display_includes_context() {
        let err = IntakeError::Assignment {
            message: "store unavailable".into(),
            source: None,
        };
        assert!(err.to_string().contains("store unavailable"));
    }
}
