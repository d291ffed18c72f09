use crate::models::DbTrainer;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_trainer(
    pool: &Pool<Postgres>,
    branch_id: Uuid,
    full_name: &str,
    specialty: Option<&str>,
) -> Result<DbTrainer> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating trainer: id={}, branch_id={}", id, branch_id);

    let trainer = sqlx::query_as::<_, DbTrainer>(
        r#"
        INSERT INTO trainers (id, branch_id, full_name, specialty, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, branch_id, full_name, specialty, created_at
        "#,
    )
    .bind(id)
    .bind(branch_id)
    .bind(full_name)
    .bind(specialty)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(trainer)
}

pub async fn get_trainer_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTrainer>> {
    let trainer = sqlx::query_as::<_, DbTrainer>(
        r#"
        SELECT id, branch_id, full_name, specialty, created_at
        FROM trainers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(trainer)
}

pub async fn list_trainers(pool: &Pool<Postgres>) -> Result<Vec<DbTrainer>> {
    let trainers = sqlx::query_as::<_, DbTrainer>(
        r#"
        SELECT id, branch_id, full_name, specialty, created_at
        FROM trainers
        ORDER BY full_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(trainers)
}
