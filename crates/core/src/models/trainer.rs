use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrainerRequest {
    pub branch_id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerResponse {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub full_name: String,
    pub specialty: Option<String>,
    pub created_at: DateTime<Utc>,
}
