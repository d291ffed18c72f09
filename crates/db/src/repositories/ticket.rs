use crate::models::DbSupportTicket;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_ticket(
    pool: &Pool<Postgres>,
    member_id: Uuid,
    subject: &str,
    body: &str,
) -> Result<DbSupportTicket> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let ticket = sqlx::query_as::<_, DbSupportTicket>(
        r#"
        INSERT INTO support_tickets (id, member_id, subject, body, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'open', $5, $5)
        RETURNING id, member_id, subject, body, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(member_id)
    .bind(subject)
    .bind(body)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(ticket)
}

pub async fn get_tickets_by_member_id(
    pool: &Pool<Postgres>,
    member_id: Uuid,
) -> Result<Vec<DbSupportTicket>> {
    let tickets = sqlx::query_as::<_, DbSupportTicket>(
        r#"
        SELECT id, member_id, subject, body, status, created_at, updated_at
        FROM support_tickets
        WHERE member_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(tickets)
}

pub async fn update_ticket_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbSupportTicket>> {
    let now = Utc::now();

    let ticket = sqlx::query_as::<_, DbSupportTicket>(
        r#"
        UPDATE support_tickets
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING id, member_id, subject, body, status, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(ticket)
}
