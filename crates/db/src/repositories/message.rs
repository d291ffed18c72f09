use crate::models::DbMessage;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_message(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    trainer_id: Uuid,
    sender: &str,
    body: &str,
) -> Result<DbMessage> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let message = sqlx::query_as::<_, DbMessage>(
        r#"
        INSERT INTO messages (id, member_id, trainer_id, sender, body, sent_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, member_id, trainer_id, sender, body, sent_at
        "#,
    )
    .bind(id)
    .bind(member_id)
    .bind(trainer_id)
    .bind(sender)
    .bind(body)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

pub async fn get_conversation(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    trainer_id: Uuid,
) -> Result<Vec<DbMessage>> {
    let messages = sqlx::query_as::<_, DbMessage>(
        r#"
        SELECT id, member_id, trainer_id, sender, body, sent_at
        FROM messages
        WHERE member_id = $1 AND trainer_id = $2
        ORDER BY sent_at ASC
        "#,
    )
    .bind(member_id)
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
