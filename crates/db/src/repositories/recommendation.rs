use crate::models::DbRecommendationLog;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Appends one log row. The table is the pipeline's audit trail and the
/// backing store for its persisted cache tier; rows are never updated.
#[allow(clippy::too_many_arguments)]
pub async fn append_log(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    input_hash: &str,
    success: bool,
    is_fallback: bool,
    model: &str,
    response: &str,
    error_message: Option<&str>,
    duration_ms: i64,
) -> Result<DbRecommendationLog> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Appending recommendation log: member_id={}, hash={}, success={}, fallback={}",
        member_id,
        input_hash,
        success,
        is_fallback
    );

    let log = sqlx::query_as::<_, DbRecommendationLog>(
        r#"
        INSERT INTO recommendation_logs
            (id, member_id, input_hash, success, is_fallback, model, response, error_message, duration_ms, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, member_id, input_hash, success, is_fallback, model, response, error_message, duration_ms, created_at
        "#,
    )
    .bind(id)
    .bind(member_id)
    .bind(input_hash)
    .bind(success)
    .bind(is_fallback)
    .bind(model)
    .bind(response)
    .bind(error_message)
    .bind(duration_ms)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(log)
}

/// Most recent successful row for (member, hash) newer than the cutoff.
/// Stale rows are skipped, not deleted.
pub async fn find_recent_success(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    input_hash: &str,
    cutoff: DateTime<Utc>,
) -> Result<Option<DbRecommendationLog>> {
    let log = sqlx::query_as::<_, DbRecommendationLog>(
        r#"
        SELECT id, member_id, input_hash, success, is_fallback, model, response, error_message, duration_ms, created_at
        FROM recommendation_logs
        WHERE member_id = $1
          AND input_hash = $2
          AND success = TRUE
          AND created_at > $3
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(member_id)
    .bind(input_hash)
    .bind(cutoff)
    .fetch_optional(pool)
    .await?;

    Ok(log)
}

pub async fn get_logs_by_member_id(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    limit: i64,
) -> Result<Vec<DbRecommendationLog>> {
    let logs = sqlx::query_as::<_, DbRecommendationLog>(
        r#"
        SELECT id, member_id, input_hash, success, is_fallback, model, response, error_message, duration_ms, created_at
        FROM recommendation_logs
        WHERE member_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(member_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(logs)
}
