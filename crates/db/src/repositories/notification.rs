use crate::models::DbNotification;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    title: &str,
    body: &str,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, member_id, title, body, is_read, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5)
        RETURNING id, member_id, title, body, is_read, created_at
        "#,
    )
    .bind(id)
    .bind(member_id)
    .bind(title)
    .bind(body)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn get_notifications_by_member_id(
    pool: &Pool<Postgres>,
    member_id: Uuid,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, member_id, title, body, is_read, created_at
        FROM notifications
        WHERE member_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

pub async fn mark_notification_read(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbNotification>> {
    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1
        RETURNING id, member_id, title, body, is_read, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(notification)
}
