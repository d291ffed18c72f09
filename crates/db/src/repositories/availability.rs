use crate::models::DbAvailabilityWindow;
use chrono::NaiveTime;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_window(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbAvailabilityWindow> {
    let id = Uuid::new_v4();

    let window = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        INSERT INTO availability_windows (id, trainer_id, day_of_week, start_time, end_time)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, trainer_id, day_of_week, start_time, end_time
        "#,
    )
    .bind(id)
    .bind(trainer_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .fetch_one(pool)
    .await?;

    Ok(window)
}

pub async fn get_windows_by_trainer_id(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
) -> Result<Vec<DbAvailabilityWindow>> {
    let windows = sqlx::query_as::<_, DbAvailabilityWindow>(
        r#"
        SELECT id, trainer_id, day_of_week, start_time, end_time
        FROM availability_windows
        WHERE trainer_id = $1
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

pub async fn delete_windows_by_trainer_id(pool: &Pool<Postgres>, trainer_id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM availability_windows
        WHERE trainer_id = $1
        "#,
    )
    .bind(trainer_id)
    .execute(pool)
    .await?;

    Ok(())
}
