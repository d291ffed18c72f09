use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbAppointment, DbAvailabilityWindow, DbBranch, DbMember, DbNotification,
    DbRecommendationLog, DbService, DbTrainer,
};

// Mock repositories for testing
mock! {
    pub BranchRepo {
        pub async fn create_branch(
            &self,
            name: &'static str,
            address: &'static str,
            phone: Option<&'static str>,
        ) -> eyre::Result<DbBranch>;

        pub async fn get_branch_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbBranch>>;

        pub async fn list_branches(&self) -> eyre::Result<Vec<DbBranch>>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;

        pub async fn list_services(&self) -> eyre::Result<Vec<DbService>>;
    }
}

mock! {
    pub TrainerRepo {
        pub async fn get_trainer_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbTrainer>>;

        pub async fn list_trainers(&self) -> eyre::Result<Vec<DbTrainer>>;
    }
}

mock! {
    pub MemberRepo {
        pub async fn get_member_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbMember>>;

        pub async fn get_member_by_email(
            &self,
            email: &'static str,
        ) -> eyre::Result<Option<DbMember>>;
    }
}

mock! {
    pub AvailabilityRepo {
        pub async fn create_window(
            &self,
            trainer_id: Uuid,
            day_of_week: i16,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<DbAvailabilityWindow>;

        pub async fn get_windows_by_trainer_id(
            &self,
            trainer_id: Uuid,
        ) -> eyre::Result<Vec<DbAvailabilityWindow>>;

        pub async fn delete_windows_by_trainer_id(
            &self,
            trainer_id: Uuid,
        ) -> eyre::Result<()>;
    }
}

mock! {
    pub AppointmentRepo {
        pub async fn create_appointment(
            &self,
            branch_id: Uuid,
            service_id: Uuid,
            trainer_id: Uuid,
            member_id: Uuid,
            starts_at: NaiveDateTime,
            ends_at: NaiveDateTime,
            notes: Option<&'static str>,
        ) -> eyre::Result<DbAppointment>;

        pub async fn get_appointment_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbAppointment>>;

        pub async fn get_appointments_by_trainer_and_date(
            &self,
            trainer_id: Uuid,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbAppointment>>;

        pub async fn update_appointment_status(
            &self,
            id: Uuid,
            status: &'static str,
        ) -> eyre::Result<Option<DbAppointment>>;
    }
}

mock! {
    pub NotificationRepo {
        pub async fn create_notification(
            &self,
            member_id: Uuid,
            title: &'static str,
            body: &'static str,
        ) -> eyre::Result<DbNotification>;

        pub async fn get_notifications_by_member_id(
            &self,
            member_id: Uuid,
        ) -> eyre::Result<Vec<DbNotification>>;

        pub async fn mark_notification_read(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbNotification>>;
    }
}

mock! {
    pub RecommendationLogRepo {
        pub async fn find_recent_success(
            &self,
            member_id: Uuid,
            input_hash: &'static str,
            cutoff: DateTime<Utc>,
        ) -> eyre::Result<Option<DbRecommendationLog>>;

        pub async fn get_logs_by_member_id(
            &self,
            member_id: Uuid,
            limit: i64,
        ) -> eyre::Result<Vec<DbRecommendationLog>>;
    }
}
