// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end flows across the engine, queue store, and processor.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};

use intake_config::model::IntakeConfig;
use intake_core::types::{
    Agent, AgentId, AgentKind, AgentStatus, BusinessHours, ConversationId, Priority, QueueState,
    SenderInfo, TenantId,
};
use intake_engine::{AssignOutcome, InboundConversation, IntakeEngine, QueueProcessor};
use intake_storage::queries;
use intake_test_utils::{
    MockAgentDirectory, MockAssignmentStore, MockEscalationSink, MockNotificationSender,
    open_temp_db,
};

struct World {
    engine: IntakeEngine,
    processor: QueueProcessor,
    assignments: MockAssignmentStore,
    directory: MockAgentDirectory,
    notifier: MockNotificationSender,
    escalation: MockEscalationSink,
    db: intake_storage::Database,
    _dir: tempfile::TempDir,
}

async fn world() -> World {
    let (db, dir) = open_temp_db().await;
    let assignments = MockAssignmentStore::new();
    let directory = MockAgentDirectory::new();
    let notifier = MockNotificationSender::new();
    let escalation = MockEscalationSink::new();
    let engine = IntakeEngine::new(
        db.clone(),
        IntakeConfig::default(),
        Arc::new(assignments.clone()),
        Arc::new(directory.clone()),
        Arc::new(notifier.clone()),
    );
    let processor = QueueProcessor::new(engine.clone(), Arc::new(escalation.clone()));
    World {
        engine,
        processor,
        assignments,
        directory,
        notifier,
        escalation,
        db,
        _dir: dir,
    }
}

fn tenant() -> TenantId {
    TenantId("tenant-1".into())
}

fn weekday_hours() -> BusinessHours {
    BusinessHours {
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        timezone: chrono_tz::UTC,
        days: vec![1, 2, 3, 4, 5],
    }
}

fn human(id: &str, max: u32) -> Agent {
    Agent {
        id: AgentId(id.into()),
        kind: AgentKind::Human,
        status: AgentStatus::Active,
        max_concurrent: Some(max),
        working_hours: None,
        monthly_quota: None,
        avg_response_secs: None,
    }
}

fn ai(id: &str, max: u32, quota: u32) -> Agent {
    Agent {
        id: AgentId(id.into()),
        kind: AgentKind::Ai,
        status: AgentStatus::Active,
        max_concurrent: Some(max),
        working_hours: None,
        monthly_quota: Some(quota),
        avg_response_secs: None,
    }
}

fn request(conv: &str, intent: Option<&str>, priority: Priority) -> InboundConversation {
    InboundConversation {
        tenant_id: tenant(),
        conversation_id: ConversationId(conv.into()),
        platform: "whatsapp".into(),
        content: "hi there".into(),
        sender_info: SenderInfo {
            platform_user_id: "u-1".into(),
            display_name: None,
        },
        intent_category: intent.map(String::from),
        priority,
        dedupe_key: None,
    }
}

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

#[tokio::test]
async fn saturday_message_defers_until_monday_opening() {
    let w = world().await;
    let hours = weekday_hours();
    let saturday = ts("2026-08-22T10:00:00Z");

    let outcome = w
        .engine
        .try_immediate_assign(request("c-1", None, Priority::Medium), Some(&hours), saturday)
        .await
        .unwrap();

    let msg = match outcome {
        AssignOutcome::Queued(msg) => msg,
        other => panic!("expected Queued, got {other:?}"),
    };
    assert_eq!(msg.estimated_process_at, ts("2026-08-24T09:00:00Z"));
    assert_eq!(msg.state, QueueState::Queued);

    let sent = w.notifier.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("reopen"), "got: {}", sent[0].1);

    let status = w.engine.queue_status(&tenant(), saturday).await.unwrap();
    assert_eq!(status.queue_length, 1);
    assert_eq!(status.oldest_queued_at, Some(saturday));
    // Monday 09:00 is 47h away.
    assert_eq!(status.estimated_wait_minutes, Some(47 * 60));
}

#[tokio::test]
async fn saturated_humans_defer_due_immediately_with_wait_notice() {
    let w = world().await;
    w.directory.add_agent(human("h1", 5)).await;
    w.assignments
        .set_active(&AgentId("h1".into()), 5)
        .await;
    let noon = ts("2026-08-25T12:00:00Z");

    let outcome = w
        .engine
        .try_immediate_assign(
            request("c-1", Some("support"), Priority::Medium),
            None,
            noon,
        )
        .await
        .unwrap();

    let msg = match outcome {
        AssignOutcome::Queued(msg) => msg,
        other => panic!("expected Queued, got {other:?}"),
    };
    // Due at the enqueue instant: any tick after capacity frees can take it.
    assert_eq!(msg.estimated_process_at, noon);

    // The default human retry estimate (15 min) only shapes the notice.
    let sent = w.notifier.sent().await;
    assert!(sent[0].1.contains("about 15 minutes"), "got: {}", sent[0].1);
    assert!(w.assignments.assignments().await.is_empty());
}

#[tokio::test]
async fn ai_agent_under_quota_is_assigned_immediately() {
    let w = world().await;
    w.directory.add_agent(ai("a1", 100, 1000)).await;
    w.assignments.set_active(&AgentId("a1".into()), 40).await;
    w.assignments.set_monthly(&AgentId("a1".into()), 950).await;
    let noon = ts("2026-08-25T12:00:00Z");

    let outcome = w
        .engine
        .try_immediate_assign(request("c-1", None, Priority::Medium), None, noon)
        .await
        .unwrap();

    match outcome {
        AssignOutcome::Assigned(agent) => assert_eq!(agent, AgentId("a1".into())),
        other => panic!("expected Assigned, got {other:?}"),
    }
    let log = w.assignments.assignments().await;
    assert_eq!(
        log,
        vec![(ConversationId("c-1".into()), AgentId("a1".into()))]
    );
    // Immediate assignment leaves nothing in the queue.
    let status = w.engine.queue_status(&tenant(), noon).await.unwrap();
    assert_eq!(status.queue_length, 0);
}

#[tokio::test]
async fn dedupe_key_makes_enqueue_idempotent_across_redeliveries() {
    let w = world().await;
    let hours = weekday_hours();
    let saturday = ts("2026-08-22T10:00:00Z");

    let mut req = request("c-1", None, Priority::Medium);
    req.dedupe_key = Some("wh-evt-7".into());

    let first = w
        .engine
        .try_immediate_assign(req.clone(), Some(&hours), saturday)
        .await
        .unwrap();
    let second = w
        .engine
        .try_immediate_assign(req, Some(&hours), saturday)
        .await
        .unwrap();

    let (first, second) = match (first, second) {
        (AssignOutcome::Queued(a), AssignOutcome::Queued(b)) => (a, b),
        other => panic!("expected two Queued outcomes, got {other:?}"),
    };
    assert_eq!(first.id, second.id);

    let status = w.engine.queue_status(&tenant(), saturday).await.unwrap();
    assert_eq!(status.queue_length, 1);
}

#[tokio::test]
async fn tick_outside_hours_claims_nothing() {
    let w = world().await;
    let hours = weekday_hours();
    let saturday = ts("2026-08-22T10:00:00Z");

    w.engine
        .try_immediate_assign(request("c-1", None, Priority::High), Some(&hours), saturday)
        .await
        .unwrap();
    // Even an agent with free capacity must not receive work off-hours.
    w.directory.add_agent(human("h1", 5)).await;

    let report = w
        .processor
        .run_tick(&tenant(), Some(&hours), ts("2026-08-22T11:00:00Z"))
        .await
        .unwrap();
    assert!(report.skipped_outside_hours);
    assert_eq!(report.claimed, 0);
    assert!(w.assignments.assignments().await.is_empty());

    let status = w
        .engine
        .queue_status(&tenant(), ts("2026-08-22T11:00:00Z"))
        .await
        .unwrap();
    assert_eq!(status.queue_length, 1);
}

#[tokio::test]
async fn tick_drains_due_messages_in_priority_then_fifo_order() {
    let w = world().await;

    // Nobody on shift: all three messages defer.
    for (conv, priority, at) in [
        ("c-low", Priority::Low, "2026-08-25T09:00:00Z"),
        ("c-high", Priority::High, "2026-08-25T09:01:00Z"),
        ("c-med", Priority::Medium, "2026-08-25T09:02:00Z"),
    ] {
        let outcome = w
            .engine
            .try_immediate_assign(request(conv, None, priority), None, ts(at))
            .await
            .unwrap();
        assert!(matches!(outcome, AssignOutcome::Queued(_)));
    }

    // An agent comes on shift with room for all three.
    w.directory.add_agent(human("h1", 5)).await;
    let report = w
        .processor
        .run_tick(&tenant(), None, ts("2026-08-25T09:30:00Z"))
        .await
        .unwrap();
    assert_eq!(report.claimed, 3);
    assert_eq!(report.assigned, 3);

    let order: Vec<_> = w
        .assignments
        .assignments()
        .await
        .into_iter()
        .map(|(conv, _)| conv.0)
        .collect();
    assert_eq!(order, vec!["c-high", "c-med", "c-low"]);

    let status = w
        .engine
        .queue_status(&tenant(), ts("2026-08-25T09:30:00Z"))
        .await
        .unwrap();
    assert_eq!(status.queue_length, 0);
}

#[tokio::test]
async fn handoff_failure_requeues_with_linear_backoff() {
    let w = world().await;
    let t0 = ts("2026-08-25T09:00:00Z");

    let outcome = w
        .engine
        .try_immediate_assign(request("c-1", None, Priority::Medium), None, t0)
        .await
        .unwrap();
    let msg = match outcome {
        AssignOutcome::Queued(msg) => msg,
        other => panic!("expected Queued, got {other:?}"),
    };

    w.directory.add_agent(human("h1", 5)).await;
    w.assignments.fail_assigns(true).await;

    let t1 = ts("2026-08-25T09:05:00Z");
    let report = w.processor.run_tick(&tenant(), None, t1).await.unwrap();
    assert_eq!(report.claimed, 1);
    assert_eq!(report.retried, 1);

    let stored = queries::queue::get(&w.db, &msg.id).await.unwrap().unwrap();
    assert_eq!(stored.state, QueueState::Queued);
    assert_eq!(stored.attempts, 1);
    // First retry: 1 * 120s base interval.
    assert_eq!(
        stored.estimated_process_at,
        t1 + chrono::Duration::seconds(120)
    );
}

#[tokio::test]
async fn retry_budget_exhaustion_fails_and_escalates() {
    let w = world().await;
    let t0 = ts("2026-08-25T08:00:00Z");

    let outcome = w
        .engine
        .try_immediate_assign(request("c-1", None, Priority::Medium), None, t0)
        .await
        .unwrap();
    let msg = match outcome {
        AssignOutcome::Queued(msg) => msg,
        other => panic!("expected Queued, got {other:?}"),
    };

    // No agents at all: every tick is a failed reprocessing try. Hourly
    // ticks always outrun the bounded backoff (max 30 minutes).
    let mut now = t0;
    for attempt in 1..=10u32 {
        now += chrono::Duration::hours(1);
        let report = w.processor.run_tick(&tenant(), None, now).await.unwrap();
        assert_eq!(report.claimed, 1, "tick {attempt} claimed nothing");
        assert_eq!(report.retried, 1);
        let stored = queries::queue::get(&w.db, &msg.id).await.unwrap().unwrap();
        assert_eq!(stored.attempts, attempt);
    }

    // Eleventh evaluation: the ceiling (10) is reached.
    now += chrono::Duration::hours(1);
    let report = w.processor.run_tick(&tenant(), None, now).await.unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(report.retried, 0);

    let stored = queries::queue::get(&w.db, &msg.id).await.unwrap().unwrap();
    assert_eq!(stored.state, QueueState::Failed);
    assert_eq!(stored.attempts, 10);

    let escalated = w.escalation.reported().await;
    assert_eq!(escalated.len(), 1);
    assert_eq!(escalated[0].id, msg.id);
    assert_eq!(escalated[0].state, QueueState::Failed);

    // Terminal: later ticks never touch it again.
    now += chrono::Duration::hours(1);
    let report = w.processor.run_tick(&tenant(), None, now).await.unwrap();
    assert_eq!(report.claimed, 0);
    assert_eq!(w.escalation.reported().await.len(), 1);
}

#[tokio::test]
async fn freed_capacity_is_consumed_by_later_ticks() {
    let w = world().await;
    w.directory.add_agent(human("h1", 1)).await;
    w.assignments.set_active(&AgentId("h1".into()), 1).await;
    let t0 = ts("2026-08-25T09:00:00Z");

    let outcome = w
        .engine
        .try_immediate_assign(request("c-1", None, Priority::Medium), None, t0)
        .await
        .unwrap();
    assert!(matches!(outcome, AssignOutcome::Queued(_)));

    // Agent frees up one minute later: the very next tick picks the message
    // up, long before the 15-minute estimate quoted to the customer.
    w.assignments.set_active(&AgentId("h1".into()), 0).await;
    let report = w
        .processor
        .run_tick(&tenant(), None, ts("2026-08-25T09:01:00Z"))
        .await
        .unwrap();
    assert_eq!(report.assigned, 1);
    assert_eq!(
        w.assignments.assignments().await,
        vec![(ConversationId("c-1".into()), AgentId("h1".into()))]
    );
}
