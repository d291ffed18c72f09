use crate::models::DbBranch;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_branch(
    pool: &Pool<Postgres>,
    name: &str,
    address: &str,
    phone: Option<&str>,
) -> Result<DbBranch> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating branch: id={}, name={}", id, name);

    let branch = sqlx::query_as::<_, DbBranch>(
        r#"
        INSERT INTO branches (id, name, address, phone, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, address, phone, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(address)
    .bind(phone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(branch)
}

pub async fn get_branch_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBranch>> {
    let branch = sqlx::query_as::<_, DbBranch>(
        r#"
        SELECT id, name, address, phone, created_at
        FROM branches
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(branch)
}

pub async fn list_branches(pool: &Pool<Postgres>) -> Result<Vec<DbBranch>> {
    let branches = sqlx::query_as::<_, DbBranch>(
        r#"
        SELECT id, name, address, phone, created_at
        FROM branches
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(branches)
}

pub async fn update_branch(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    address: Option<&str>,
    phone: Option<&str>,
) -> Result<Option<DbBranch>> {
    let branch = sqlx::query_as::<_, DbBranch>(
        r#"
        UPDATE branches
        SET name = COALESCE($2, name),
            address = COALESCE($3, address),
            phone = COALESCE($4, phone)
        WHERE id = $1
        RETURNING id, name, address, phone, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(address)
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(branch)
}

pub async fn delete_branch(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM branches
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
