use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    BuildMuscle,
    Endurance,
    GeneralFitness,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::LoseWeight => "lose_weight",
            FitnessGoal::BuildMuscle => "build_muscle",
            FitnessGoal::Endurance => "endurance",
            FitnessGoal::GeneralFitness => "general_fitness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    None,
    Home,
    FullGym,
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::None => "none",
            Equipment::Home => "home",
            Equipment::FullGym => "full_gym",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub gender: Gender,
    pub goal: FitnessGoal,
    pub equipment: Equipment,
    pub training_days: u8,
}

impl Measurements {
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

/// Structured plan expected in the model's JSON output. Aliases cover the
/// camelCase field names the external API emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPlan {
    pub summary: String,
    #[serde(alias = "workoutPlan")]
    pub workout_plan: Vec<String>,
    #[serde(alias = "nutritionTips")]
    pub nutrition_tips: Vec<String>,
    #[serde(default, alias = "warnings")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub plan: RecommendationPlan,
    pub model: String,
    pub is_fallback: bool,
    pub is_cached: bool,
    #[serde(default)]
    pub after_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub member_id: Uuid,
    pub measurements: Option<Measurements>,
    pub photo_base64: Option<String>,
    pub photo_content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub summary: String,
    pub workout_plan: Vec<String>,
    pub nutrition_tips: Vec<String>,
    pub notes: Vec<String>,
    pub model: String,
    pub is_fallback: bool,
    pub is_cached: bool,
    #[serde(default)]
    pub after_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationHistoryEntry {
    pub id: Uuid,
    pub input_hash: String,
    pub success: bool,
    pub is_fallback: bool,
    pub model: String,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationHistoryResponse {
    pub member_id: Uuid,
    pub entries: Vec<RecommendationHistoryEntry>,
}
