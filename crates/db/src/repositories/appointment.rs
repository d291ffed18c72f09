use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str =
    "id, branch_id, service_id, trainer_id, member_id, starts_at, ends_at, status, notes, created_at";

#[allow(clippy::too_many_arguments)]
pub async fn create_appointment(
    pool: &Pool<Postgres>,
    branch_id: Uuid,
    service_id: Uuid,
    trainer_id: Uuid,
    member_id: Uuid,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
    notes: Option<&str>,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, trainer_id={}, starts_at={}",
        id,
        trainer_id,
        starts_at
    );

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments
            (id, branch_id, service_id, trainer_id, member_id, starts_at, ends_at, status, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8, $9)
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(branch_id)
    .bind(service_id)
    .bind(trainer_id)
    .bind(member_id)
    .bind(starts_at)
    .bind(ends_at)
    .bind(notes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(appointment)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// All of a trainer's appointments whose start falls on the given calendar
/// date, regardless of status. The conflict checker filters out cancelled
/// rows itself.
pub async fn get_appointments_by_trainer_and_date(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let day_start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    let day_end = day_start + chrono::Duration::days(1);

    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE trainer_id = $1
          AND starts_at >= $2
          AND starts_at < $3
        ORDER BY starts_at ASC
        "#
    ))
    .bind(trainer_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointments_by_member_id(
    pool: &Pool<Postgres>,
    member_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE member_id = $1
        ORDER BY starts_at DESC
        "#
    ))
    .bind(member_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn get_appointments_by_trainer_id(
    pool: &Pool<Postgres>,
    trainer_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE trainer_id = $1
        ORDER BY starts_at DESC
        "#
    ))
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(appointments)
}

pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
