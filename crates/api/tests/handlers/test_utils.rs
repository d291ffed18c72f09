use chrono::{NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use fitclub_db::mock::repositories::{
    MockAppointmentRepo, MockAvailabilityRepo, MockMemberRepo, MockNotificationRepo,
    MockServiceRepo, MockTrainerRepo,
};
use fitclub_db::models::{DbAppointment, DbAvailabilityWindow, DbService, DbTrainer};

pub struct TestContext {
    // Mocks for each repository the handlers touch
    pub appointment_repo: MockAppointmentRepo,
    pub availability_repo: MockAvailabilityRepo,
    pub member_repo: MockMemberRepo,
    pub notification_repo: MockNotificationRepo,
    pub service_repo: MockServiceRepo,
    pub trainer_repo: MockTrainerRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            appointment_repo: MockAppointmentRepo::new(),
            availability_repo: MockAvailabilityRepo::new(),
            member_repo: MockMemberRepo::new(),
            notification_repo: MockNotificationRepo::new(),
            service_repo: MockServiceRepo::new(),
            trainer_repo: MockTrainerRepo::new(),
        }
    }
}

pub fn db_trainer(id: Uuid, branch_id: Uuid) -> DbTrainer {
    DbTrainer {
        id,
        branch_id,
        full_name: "Alex Keller".to_string(),
        specialty: Some("strength".to_string()),
        created_at: Utc::now(),
    }
}

pub fn db_service(id: Uuid, branch_id: Uuid, duration_minutes: i32) -> DbService {
    DbService {
        id,
        branch_id,
        name: "Personal training".to_string(),
        duration_minutes,
        price_cents: 5_000,
        created_at: Utc::now(),
    }
}

pub fn db_window(
    trainer_id: Uuid,
    day_of_week: i16,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> DbAvailabilityWindow {
    DbAvailabilityWindow {
        id: Uuid::new_v4(),
        trainer_id,
        day_of_week,
        start_time,
        end_time,
    }
}

pub fn db_appointment(
    trainer_id: Uuid,
    starts_at: NaiveDateTime,
    ends_at: NaiveDateTime,
    status: &str,
) -> DbAppointment {
    DbAppointment {
        id: Uuid::new_v4(),
        branch_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        trainer_id,
        member_id: Uuid::new_v4(),
        starts_at,
        ends_at,
        status: status.to_string(),
        notes: None,
        created_at: Utc::now(),
    }
}
