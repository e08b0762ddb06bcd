// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue operations for crash-safe deferred-message processing.
//!
//! Status machine: queued -> processing -> {processed | queued | failed}.
//! Claims are transaction-scoped compare-and-set updates, so two concurrent
//! processor runs can never deliver the same row twice. All timestamps are
//! RFC 3339 UTC text, which compares correctly as strings in SQL.

use chrono::{DateTime, SecondsFormat, Utc};
use intake_core::IntakeError;
use intake_core::types::{
    ConversationId, MessageId, Priority, QueueState, QueuedMessage, SenderInfo, TenantId,
};
use rusqlite::{OptionalExtension, params};
use tracing::debug;

use crate::database::Database;
use crate::models::{NewQueuedMessage, QueueDepth};

const COLUMNS: &str = "id, tenant_id, conversation_id, platform, content, sender_info, \
     intent_category, priority, status, attempts, queued_at, estimated_process_at, \
     claimed_at, dedupe_key";

fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<QueuedMessage> {
    let sender_raw: String = row.get(5)?;
    let sender_info: SenderInfo = serde_json::from_str(&sender_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let priority_raw: String = row.get(7)?;
    let priority: Priority = priority_raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let status_raw: String = row.get(8)?;
    let state: QueueState = status_raw.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let queued_raw: String = row.get(10)?;
    let estimated_raw: String = row.get(11)?;
    let claimed_raw: Option<String> = row.get(12)?;
    let claimed_at = match claimed_raw {
        Some(raw) => Some(parse_ts(12, &raw)?),
        None => None,
    };
    Ok(QueuedMessage {
        id: MessageId(row.get(0)?),
        tenant_id: TenantId(row.get(1)?),
        conversation_id: ConversationId(row.get(2)?),
        platform: row.get(3)?,
        content: row.get(4)?,
        sender_info,
        intent_category: row.get(6)?,
        priority,
        state,
        attempts: row.get(9)?,
        queued_at: parse_ts(10, &queued_raw)?,
        estimated_process_at: parse_ts(11, &estimated_raw)?,
        claimed_at,
        dedupe_key: row.get(13)?,
    })
}

/// Enqueue a deferred message, assigning it a fresh UUID.
///
/// Idempotent on `dedupe_key`: if a row with the same key already exists
/// (from a redelivered webhook), the existing row is returned unchanged.
pub async fn enqueue(db: &Database, new: NewQueuedMessage) -> Result<QueuedMessage, IntakeError> {
    let id = uuid::Uuid::new_v4().to_string();
    let sender_json = serde_json::to_string(&new.sender_info)
        .map_err(|e| IntakeError::Internal(format!("sender_info serialization failed: {e}")))?;
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            if let Some(key) = &new.dedupe_key {
                let existing = {
                    let mut stmt = tx.prepare(&format!(
                        "SELECT {COLUMNS} FROM queued_messages WHERE dedupe_key = ?1"
                    ))?;
                    stmt.query_row(params![key], row_to_message).optional()?
                };
                if let Some(msg) = existing {
                    tx.commit()?;
                    return Ok(msg);
                }
            }

            let queued_s = encode_ts(new.queued_at);
            let estimated_s = encode_ts(new.estimated_process_at);
            tx.execute(
                "INSERT INTO queued_messages
                     (id, tenant_id, conversation_id, platform, content, sender_info,
                      intent_category, priority, status, attempts, queued_at,
                      estimated_process_at, claimed_at, dedupe_key, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'queued', 0, ?9, ?10, NULL, ?11, ?9)",
                params![
                    id,
                    new.tenant_id.0,
                    new.conversation_id.0,
                    new.platform,
                    new.content,
                    sender_json,
                    new.intent_category,
                    new.priority.to_string(),
                    queued_s,
                    estimated_s,
                    new.dedupe_key,
                ],
            )?;
            tx.commit()?;

            Ok(QueuedMessage {
                id: MessageId(id),
                tenant_id: new.tenant_id,
                conversation_id: new.conversation_id,
                platform: new.platform,
                content: new.content,
                sender_info: new.sender_info,
                intent_category: new.intent_category,
                priority: new.priority,
                state: QueueState::Queued,
                attempts: 0,
                queued_at: new.queued_at,
                estimated_process_at: new.estimated_process_at,
                claimed_at: None,
                dedupe_key: new.dedupe_key,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Claim a batch of due messages for the tenant, marking them `processing`.
///
/// Ordering is priority (high before medium before low), then enqueue time
/// ascending within a priority band. Each claim is a compare-and-set on
/// `status = 'queued'`, so rows claimed by a concurrent run are skipped.
pub async fn dequeue_due(
    db: &Database,
    tenant: &TenantId,
    now: DateTime<Utc>,
    limit: u32,
) -> Result<Vec<QueuedMessage>, IntakeError> {
    let tenant = tenant.0.clone();
    let now_s = encode_ts(now);
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let candidates = {
                let mut stmt = tx.prepare(&format!(
                    "SELECT {COLUMNS} FROM queued_messages
                     WHERE tenant_id = ?1 AND status = 'queued'
                       AND estimated_process_at <= ?2
                     ORDER BY CASE priority
                                  WHEN 'high' THEN 0
                                  WHEN 'medium' THEN 1
                                  ELSE 2
                              END ASC,
                              queued_at ASC
                     LIMIT ?3"
                ))?;
                let rows = stmt.query_map(params![tenant, now_s, i64::from(limit)], row_to_message)?;
                rows.collect::<Result<Vec<_>, _>>()?
            };

            let mut claimed = Vec::with_capacity(candidates.len());
            for mut msg in candidates {
                let changed = tx.execute(
                    "UPDATE queued_messages
                     SET status = 'processing', claimed_at = ?2, updated_at = ?2
                     WHERE id = ?1 AND status = 'queued'",
                    params![msg.id.0, now_s],
                )?;
                if changed == 1 {
                    msg.state = QueueState::Processing;
                    msg.claimed_at = Some(now);
                    claimed.push(msg);
                }
            }
            tx.commit()?;
            Ok(claimed)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a claimed message as successfully processed (terminal).
pub async fn mark_processed(
    db: &Database,
    id: &MessageId,
    now: DateTime<Utc>,
) -> Result<(), IntakeError> {
    let id_s = id.0.clone();
    let now_s = encode_ts(now);
    let changed = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute(
                "UPDATE queued_messages
                 SET status = 'processed', claimed_at = NULL, updated_at = ?2
                 WHERE id = ?1 AND status = 'processing'",
                params![id_s, now_s],
            )?)
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if changed == 0 {
        return Err(IntakeError::Internal(format!(
            "cannot mark message {id} processed: not in processing state"
        )));
    }
    Ok(())
}

/// Return a claimed message to the queue for a later retry.
///
/// Increments the attempt counter and sets the next earliest processing time.
pub async fn mark_retry(
    db: &Database,
    id: &MessageId,
    next_attempt_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), IntakeError> {
    let id_s = id.0.clone();
    let next_s = encode_ts(next_attempt_at);
    let now_s = encode_ts(now);
    let changed = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute(
                "UPDATE queued_messages
                 SET status = 'queued', attempts = attempts + 1,
                     estimated_process_at = ?2, claimed_at = NULL, updated_at = ?3
                 WHERE id = ?1 AND status = 'processing'",
                params![id_s, next_s, now_s],
            )?)
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if changed == 0 {
        return Err(IntakeError::Internal(format!(
            "cannot requeue message {id}: not in processing state"
        )));
    }
    Ok(())
}

/// Mark a claimed message as permanently failed (terminal).
pub async fn mark_failed(
    db: &Database,
    id: &MessageId,
    now: DateTime<Utc>,
) -> Result<(), IntakeError> {
    let id_s = id.0.clone();
    let now_s = encode_ts(now);
    let changed = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute(
                "UPDATE queued_messages
                 SET status = 'failed', claimed_at = NULL, updated_at = ?2
                 WHERE id = ?1 AND status = 'processing'",
                params![id_s, now_s],
            )?)
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if changed == 0 {
        return Err(IntakeError::Internal(format!(
            "cannot mark message {id} failed: not in processing state"
        )));
    }
    Ok(())
}

/// Release the tenant's claims older than the timeout back to `queued`.
///
/// Covers the crash-recovery case: a processor that died mid-batch leaves
/// rows stuck in `processing`, and the tenant's next run reclaims them
/// here. Other tenants' claims are never touched.
pub async fn release_stale(
    db: &Database,
    tenant: &TenantId,
    now: DateTime<Utc>,
    claim_timeout_secs: u64,
) -> Result<u32, IntakeError> {
    let tenant_s = tenant.0.clone();
    let cutoff = now - chrono::Duration::seconds(claim_timeout_secs as i64);
    let cutoff_s = encode_ts(cutoff);
    let now_s = encode_ts(now);
    let released = db
        .connection()
        .call(move |conn| {
            Ok(conn.execute(
                "UPDATE queued_messages
                 SET status = 'queued', claimed_at = NULL, updated_at = ?2
                 WHERE tenant_id = ?3 AND status = 'processing' AND claimed_at <= ?1",
                params![cutoff_s, now_s, tenant_s],
            )? as u32)
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    if released > 0 {
        debug!(tenant = %tenant, released, "released stale queue claims");
    }
    Ok(released)
}

/// Fetch a single message by id.
pub async fn get(db: &Database, id: &MessageId) -> Result<Option<QueuedMessage>, IntakeError> {
    let id_s = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM queued_messages WHERE id = ?1"
            ))?;
            Ok(stmt.query_row(params![id_s], row_to_message).optional()?)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Aggregate view of the tenant's waiting messages.
pub async fn queue_status(db: &Database, tenant: &TenantId) -> Result<QueueDepth, IntakeError> {
    let tenant = tenant.0.clone();
    let (count, oldest_raw, next_raw) = db
        .connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT COUNT(*), MIN(queued_at), MIN(estimated_process_at)
                 FROM queued_messages
                 WHERE tenant_id = ?1 AND status = 'queued'",
                params![tenant],
                |row| {
                    Ok((
                        row.get::<_, u32>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
        })
        .await
        .map_err(crate::database::map_tr_err)?;
    Ok(QueueDepth {
        waiting: count,
        oldest_queued_at: parse_status_ts(oldest_raw)?,
        next_due: parse_status_ts(next_raw)?,
    })
}

fn parse_status_ts(raw: Option<String>) -> Result<Option<DateTime<Utc>>, IntakeError> {
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| IntakeError::Internal(format!("corrupt queue timestamp: {e}")))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 25, h, m, 0).unwrap()
    }

    fn new_message(conversation: &str, priority: Priority, queued_at: DateTime<Utc>) -> NewQueuedMessage {
        NewQueuedMessage {
            tenant_id: TenantId("tenant-1".into()),
            conversation_id: ConversationId(conversation.into()),
            platform: "whatsapp".into(),
            content: "hello".into(),
            sender_info: SenderInfo {
                platform_user_id: "u-1".into(),
                display_name: Some("Pat".into()),
            },
            intent_category: None,
            priority,
            queued_at,
            estimated_process_at: queued_at,
            dedupe_key: None,
        }
    }

    #[tokio::test]
    async fn enqueue_assigns_id_and_initial_state() {
        let (db, _dir) = setup_db().await;

        let msg = enqueue(&db, new_message("c-1", Priority::Medium, at(9, 0)))
            .await
            .unwrap();
        assert!(!msg.id.0.is_empty());
        assert_eq!(msg.state, QueueState::Queued);
        assert_eq!(msg.attempts, 0);
        assert!(msg.claimed_at.is_none());

        let fetched = get(&db, &msg.id).await.unwrap().unwrap();
        assert_eq!(fetched, msg);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn enqueue_with_dedupe_key_is_idempotent() {
        let (db, _dir) = setup_db().await;

        let mut first = new_message("c-1", Priority::Medium, at(9, 0));
        first.dedupe_key = Some("wh-evt-42".into());
        let stored = enqueue(&db, first.clone()).await.unwrap();

        // Redelivered webhook: same key, possibly different content.
        let mut second = first;
        second.content = "hello again".into();
        let replay = enqueue(&db, second).await.unwrap();
        assert_eq!(replay.id, stored.id);
        assert_eq!(replay.content, "hello");

        let depth = queue_status(&db, &TenantId("tenant-1".into())).await.unwrap();
        assert_eq!(depth.waiting, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn dequeue_orders_by_priority_then_enqueue_time() {
        let (db, _dir) = setup_db().await;

        let low = enqueue(&db, new_message("c-low", Priority::Low, at(9, 0)))
            .await
            .unwrap();
        let high = enqueue(&db, new_message("c-high", Priority::High, at(9, 1)))
            .await
            .unwrap();
        let medium = enqueue(&db, new_message("c-med", Priority::Medium, at(9, 2)))
            .await
            .unwrap();

        let claimed = dequeue_due(&db, &TenantId("tenant-1".into()), at(10, 0), 50)
            .await
            .unwrap();
        let order: Vec<_> = claimed.iter().map(|m| m.id.clone()).collect();
        assert_eq!(order, vec![high.id, medium.id, low.id]);
        assert!(claimed.iter().all(|m| m.state == QueueState::Processing));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn dequeue_skips_future_and_foreign_rows() {
        let (db, _dir) = setup_db().await;

        let mut future = new_message("c-future", Priority::High, at(9, 0));
        future.estimated_process_at = at(15, 0);
        enqueue(&db, future).await.unwrap();

        let mut foreign = new_message("c-other", Priority::High, at(9, 0));
        foreign.tenant_id = TenantId("tenant-2".into());
        enqueue(&db, foreign).await.unwrap();

        let due = enqueue(&db, new_message("c-due", Priority::Low, at(9, 0)))
            .await
            .unwrap();

        let claimed = dequeue_due(&db, &TenantId("tenant-1".into()), at(10, 0), 50)
            .await
            .unwrap();
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].id, due.id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn claimed_rows_are_not_redelivered() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        enqueue(&db, new_message("c-1", Priority::Medium, at(9, 0)))
            .await
            .unwrap();

        let first = dequeue_due(&db, &tenant, at(10, 0), 50).await.unwrap();
        assert_eq!(first.len(), 1);

        let second = dequeue_due(&db, &tenant, at(10, 0), 50).await.unwrap();
        assert!(second.is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn batch_limit_is_respected() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        for i in 0..5u32 {
            enqueue(&db, new_message(&format!("c-{i}"), Priority::Medium, at(9, i)))
                .await
                .unwrap();
        }

        let claimed = dequeue_due(&db, &tenant, at(10, 0), 3).await.unwrap();
        assert_eq!(claimed.len(), 3);

        let rest = dequeue_due(&db, &tenant, at(10, 0), 3).await.unwrap();
        assert_eq!(rest.len(), 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn mark_processed_is_terminal() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        enqueue(&db, new_message("c-1", Priority::Medium, at(9, 0)))
            .await
            .unwrap();
        let claimed = dequeue_due(&db, &tenant, at(10, 0), 50).await.unwrap();
        let id = claimed[0].id.clone();

        mark_processed(&db, &id, at(10, 1)).await.unwrap();
        let msg = get(&db, &id).await.unwrap().unwrap();
        assert_eq!(msg.state, QueueState::Processed);
        assert!(msg.claimed_at.is_none());

        // Terminal: a second transition attempt is rejected.
        assert!(mark_processed(&db, &id, at(10, 2)).await.is_err());
        assert!(mark_failed(&db, &id, at(10, 2)).await.is_err());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn mark_retry_increments_attempts_and_reschedules() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        enqueue(&db, new_message("c-1", Priority::Medium, at(9, 0)))
            .await
            .unwrap();
        let claimed = dequeue_due(&db, &tenant, at(10, 0), 50).await.unwrap();
        let id = claimed[0].id.clone();

        mark_retry(&db, &id, at(10, 15), at(10, 0)).await.unwrap();
        let msg = get(&db, &id).await.unwrap().unwrap();
        assert_eq!(msg.state, QueueState::Queued);
        assert_eq!(msg.attempts, 1);
        assert_eq!(msg.estimated_process_at, at(10, 15));
        assert!(msg.claimed_at.is_none());

        // Not due again until the retry time passes.
        assert!(dequeue_due(&db, &tenant, at(10, 5), 50).await.unwrap().is_empty());
        let redelivered = dequeue_due(&db, &tenant, at(10, 15), 50).await.unwrap();
        assert_eq!(redelivered.len(), 1);
        assert_eq!(redelivered[0].attempts, 1);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn mark_failed_is_terminal() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        enqueue(&db, new_message("c-1", Priority::Medium, at(9, 0)))
            .await
            .unwrap();
        let claimed = dequeue_due(&db, &tenant, at(10, 0), 50).await.unwrap();
        let id = claimed[0].id.clone();

        mark_failed(&db, &id, at(10, 1)).await.unwrap();
        let msg = get(&db, &id).await.unwrap().unwrap();
        assert_eq!(msg.state, QueueState::Failed);

        assert!(dequeue_due(&db, &tenant, at(11, 0), 50).await.unwrap().is_empty());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn release_stale_requeues_timed_out_claims_only() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        enqueue(&db, new_message("c-old", Priority::Medium, at(9, 0)))
            .await
            .unwrap();
        let stale = dequeue_due(&db, &tenant, at(9, 30), 50).await.unwrap();
        assert_eq!(stale.len(), 1);

        enqueue(&db, new_message("c-new", Priority::Medium, at(9, 40)))
            .await
            .unwrap();
        let fresh = dequeue_due(&db, &tenant, at(9, 58), 50).await.unwrap();
        assert_eq!(fresh.len(), 1);

        // 300s timeout at 10:00: the 09:30 claim is stale, the 09:58 one is not.
        let released = release_stale(&db, &tenant, at(10, 0), 300).await.unwrap();
        assert_eq!(released, 1);

        let old = get(&db, &stale[0].id).await.unwrap().unwrap();
        assert_eq!(old.state, QueueState::Queued);
        assert!(old.claimed_at.is_none());
        // Releasing does not count as an attempt.
        assert_eq!(old.attempts, 0);

        let new = get(&db, &fresh[0].id).await.unwrap().unwrap();
        assert_eq!(new.state, QueueState::Processing);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn release_stale_never_touches_other_tenants() {
        let (db, _dir) = setup_db().await;
        let tenant_a = TenantId("tenant-1".into());
        let tenant_b = TenantId("tenant-2".into());

        enqueue(&db, new_message("c-a", Priority::Medium, at(9, 0)))
            .await
            .unwrap();
        let mut foreign = new_message("c-b", Priority::Medium, at(9, 0));
        foreign.tenant_id = tenant_b.clone();
        enqueue(&db, foreign).await.unwrap();

        // Both claims go stale at the same instant.
        let a_claims = dequeue_due(&db, &tenant_a, at(9, 30), 50).await.unwrap();
        let b_claims = dequeue_due(&db, &tenant_b, at(9, 30), 50).await.unwrap();
        assert_eq!((a_claims.len(), b_claims.len()), (1, 1));

        let released = release_stale(&db, &tenant_a, at(10, 0), 300).await.unwrap();
        assert_eq!(released, 1);

        let own = get(&db, &a_claims[0].id).await.unwrap().unwrap();
        assert_eq!(own.state, QueueState::Queued);
        let other = get(&db, &b_claims[0].id).await.unwrap().unwrap();
        assert_eq!(other.state, QueueState::Processing);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn queue_status_counts_waiting_rows_and_oldest() {
        let (db, _dir) = setup_db().await;
        let tenant = TenantId("tenant-1".into());

        let depth = queue_status(&db, &tenant).await.unwrap();
        assert_eq!(depth.waiting, 0);
        assert!(depth.oldest_queued_at.is_none());
        assert!(depth.next_due.is_none());

        enqueue(&db, new_message("c-1", Priority::Medium, at(9, 5)))
            .await
            .unwrap();
        enqueue(&db, new_message("c-2", Priority::High, at(9, 0)))
            .await
            .unwrap();
        let claimed = dequeue_due(&db, &tenant, at(9, 1), 1).await.unwrap();
        assert_eq!(claimed.len(), 1);

        // One claimed (processing), one still waiting.
        let depth = queue_status(&db, &tenant).await.unwrap();
        assert_eq!(depth.waiting, 1);
        assert_eq!(depth.oldest_queued_at, Some(at(9, 5)));
        assert_eq!(depth.next_due, Some(at(9, 5)));

        db.close().await.unwrap();
    }
}
