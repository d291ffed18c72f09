use crate::models::DbMember;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_member(
    pool: &Pool<Postgres>,
    full_name: &str,
    email: &str,
    phone: Option<&str>,
    date_of_birth: Option<NaiveDate>,
) -> Result<DbMember> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating member: id={}, email={}", id, email);

    let member = sqlx::query_as::<_, DbMember>(
        r#"
        INSERT INTO members (id, full_name, email, phone, date_of_birth, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, full_name, email, phone, date_of_birth, created_at
        "#,
    )
    .bind(id)
    .bind(full_name)
    .bind(email)
    .bind(phone)
    .bind(date_of_birth)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(member)
}

pub async fn get_member_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbMember>> {
    let member = sqlx::query_as::<_, DbMember>(
        r#"
        SELECT id, full_name, email, phone, date_of_birth, created_at
        FROM members
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(member)
}

pub async fn get_member_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbMember>> {
    let member = sqlx::query_as::<_, DbMember>(
        r#"
        SELECT id, full_name, email, phone, date_of_birth, created_at
        FROM members
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(member)
}
