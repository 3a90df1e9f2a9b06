//! Append-only audit trail for proposal mutations.
//!
//! Logging is best-effort: callers invoke it with `let _ =` and a failed
//! insert never fails the request it describes.

use serde_json::Value;

use crate::auth::session::Actor;
use crate::db::DbPool;

pub async fn log(
    pool: &DbPool,
    actor: &Actor,
    action: &str,
    target_id: i64,
    details: Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_log (actor_kind, actor_id, action, target_id, details, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(actor.kind.as_str())
    .bind(actor.id)
    .bind(action)
    .bind(target_id)
    .bind(details.to_string())
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(pool)
    .await?;
    Ok(())
}

/// Most recent audit entries for a target, newest first.
pub async fn entries_for(
    pool: &DbPool,
    target_id: i64,
    limit: i64,
) -> Result<Vec<(String, String)>, sqlx::Error> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT action, created_at FROM audit_log \
         WHERE target_id = ?1 ORDER BY id DESC LIMIT ?2",
    )
    .bind(target_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
