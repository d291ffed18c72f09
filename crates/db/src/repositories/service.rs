use crate::models::DbService;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    branch_id: Uuid,
    name: &str,
    duration_minutes: i32,
    price_cents: i64,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating service: id={}, branch_id={}, name={}, duration={}min",
        id,
        branch_id,
        name,
        duration_minutes
    );

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, branch_id, name, duration_minutes, price_cents, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, branch_id, name, duration_minutes, price_cents, created_at
        "#,
    )
    .bind(id)
    .bind(branch_id)
    .bind(name)
    .bind(duration_minutes)
    .bind(price_cents)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, branch_id, name, duration_minutes, price_cents, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, branch_id, name, duration_minutes, price_cents, created_at
        FROM services
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn update_service(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    duration_minutes: Option<i32>,
    price_cents: Option<i64>,
) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        UPDATE services
        SET name = COALESCE($2, name),
            duration_minutes = COALESCE($3, duration_minutes),
            price_cents = COALESCE($4, price_cents)
        WHERE id = $1
        RETURNING id, branch_id, name, duration_minutes, price_cents, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(duration_minutes)
    .bind(price_cents)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}
