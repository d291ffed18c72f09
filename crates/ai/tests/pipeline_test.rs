use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use fitclub_ai::client::{ModelError, ModelRequest, VisionClient};
use fitclub_ai::config::AiConfig;
use fitclub_ai::input::RecommendationInput;
use fitclub_ai::pipeline::{MAX_ATTEMPTS, RecommendationPipeline, backoff_delay};
use fitclub_ai::store::{NewLogEntry, RecommendationStore};
use fitclub_core::models::recommendation::{
    Equipment, FitnessGoal, Gender, Measurements, RecommendationPlan,
};
use fitclub_db::models::DbRecommendationLog;

mock! {
    pub Client {}

    #[async_trait]
    impl VisionClient for Client {
        fn model_name(&self) -> &str;
        async fn complete(&self, request: &ModelRequest) -> Result<String, ModelError>;
    }
}

/// In-memory stand-in for the append-only log store.
#[derive(Clone, Default)]
struct FakeStore {
    rows: Arc<Mutex<Vec<DbRecommendationLog>>>,
    fail_append: bool,
}

impl FakeStore {
    fn failing() -> Self {
        Self {
            fail_append: true,
            ..Self::default()
        }
    }

    fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn last_row(&self) -> DbRecommendationLog {
        self.rows.lock().unwrap().last().cloned().expect("no rows appended")
    }

    fn seed_success(&self, member_id: Uuid, input_hash: &str, plan: &RecommendationPlan, model: &str) {
        self.rows.lock().unwrap().push(DbRecommendationLog {
            id: Uuid::new_v4(),
            member_id,
            input_hash: input_hash.to_string(),
            success: true,
            is_fallback: false,
            model: model.to_string(),
            response: serde_json::to_string(plan).unwrap(),
            error_message: None,
            duration_ms: 42,
            created_at: Utc::now(),
        });
    }
}

#[async_trait]
impl RecommendationStore for FakeStore {
    async fn find_recent_success(
        &self,
        member_id: Uuid,
        input_hash: &str,
        max_age_hours: i64,
    ) -> eyre::Result<Option<DbRecommendationLog>> {
        let cutoff = Utc::now() - chrono::Duration::hours(max_age_hours);
        let rows = self.rows.lock().unwrap();

        Ok(rows
            .iter()
            .filter(|row| {
                row.member_id == member_id
                    && row.input_hash == input_hash
                    && row.success
                    && row.created_at > cutoff
            })
            .max_by_key(|row| row.created_at)
            .cloned())
    }

    async fn append(&self, entry: NewLogEntry) -> eyre::Result<()> {
        if self.fail_append {
            return Err(eyre::eyre!("log store is unavailable"));
        }

        self.rows.lock().unwrap().push(DbRecommendationLog {
            id: Uuid::new_v4(),
            member_id: entry.member_id,
            input_hash: entry.input_hash,
            success: entry.success,
            is_fallback: entry.is_fallback,
            model: entry.model,
            response: entry.response,
            error_message: entry.error_message,
            duration_ms: entry.duration_ms,
            created_at: Utc::now(),
        });

        Ok(())
    }
}

fn test_config() -> AiConfig {
    AiConfig {
        retry_base_delay: Duration::from_millis(0),
        ..AiConfig::default()
    }
}

fn measurements_input() -> RecommendationInput {
    RecommendationInput::Measurements(Measurements {
        height_cm: 180.0,
        weight_kg: 80.0,
        age: 30,
        gender: Gender::Male,
        goal: FitnessGoal::BuildMuscle,
        equipment: Equipment::FullGym,
        training_days: 4,
    })
}

fn model_plan_json() -> String {
    r#"{
        "summary": "Strong base, add volume.",
        "workoutPlan": ["Day 1: push", "Day 2: pull", "Day 3: legs", "Day 4: accessories"],
        "nutritionTips": ["2g protein per kg"],
        "warnings": []
    }"#
    .to_string()
}

#[tokio::test]
async fn test_persisted_cache_hit_never_calls_the_model() {
    let input = measurements_input();
    let member_id = Uuid::new_v4();

    let plan = RecommendationPlan {
        summary: "Cached plan".to_string(),
        workout_plan: vec!["Day 1: anything".to_string()],
        nutrition_tips: vec!["Eat well".to_string()],
        notes: vec![],
    };
    let store = FakeStore::default();
    store.seed_success(member_id, &input.cache_key(), &plan, "ext-model");

    let mut client = MockClient::new();
    client.expect_complete().times(0);

    let pipeline = RecommendationPipeline::new(Some(client), store.clone(), &test_config());
    let result = pipeline.get_recommendation(member_id, &input).await;

    assert!(result.is_cached);
    assert!(!result.is_fallback);
    assert_eq!(result.model, "ext-model");
    assert_eq!(result.plan.summary, "Cached plan");
    // Cache hits do not append a new row
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn test_successful_call_is_parsed_logged_and_memory_cached() {
    let input = measurements_input();
    let member_id = Uuid::new_v4();
    let store = FakeStore::default();

    let mut client = MockClient::new();
    client
        .expect_complete()
        .times(1)
        .returning(|_| Ok(model_plan_json()));
    client
        .expect_model_name()
        .return_const("ext-model".to_string());

    let pipeline = RecommendationPipeline::new(Some(client), store.clone(), &test_config());

    let first = pipeline.get_recommendation(member_id, &input).await;
    assert!(!first.is_cached);
    assert!(!first.is_fallback);
    assert_eq!(first.model, "ext-model");
    assert_eq!(first.plan.workout_plan.len(), 4);

    let row = store.last_row();
    assert!(row.success);
    assert!(!row.is_fallback);
    assert_eq!(row.model, "ext-model");
    assert!(row.error_message.is_none());

    // Immediate repeat is served from the in-process tier; the mock's
    // times(1) would fail if the model were called again
    let second = pipeline.get_recommendation(member_id, &input).await;
    assert!(second.is_cached);
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn test_service_unavailable_retries_then_falls_back() {
    let input = measurements_input();
    let store = FakeStore::default();

    let mut client = MockClient::new();
    client
        .expect_complete()
        .times(MAX_ATTEMPTS as usize)
        .returning(|_| Err(ModelError::Unavailable("maintenance".to_string())));

    let pipeline = RecommendationPipeline::new(Some(client), store.clone(), &test_config());
    let result = pipeline.get_recommendation(Uuid::new_v4(), &input).await;

    assert!(result.is_fallback);
    assert!(!result.is_cached);
    assert_eq!(result.model, "fallback");
    assert!(!result.plan.workout_plan.is_empty());

    let row = store.last_row();
    assert!(!row.success);
    assert!(row.is_fallback);
    assert!(row.error_message.unwrap().contains("could not be reached"));
}

#[tokio::test]
async fn test_rate_limit_retries_are_capped_at_three_attempts() {
    let input = measurements_input();
    let store = FakeStore::default();

    let mut client = MockClient::new();
    client
        .expect_complete()
        .times(3)
        .returning(|_| Err(ModelError::RateLimited("slow down".to_string())));

    let pipeline = RecommendationPipeline::new(Some(client), store.clone(), &test_config());
    let result = pipeline.get_recommendation(Uuid::new_v4(), &input).await;

    assert!(result.is_fallback);
    assert!(
        store
            .last_row()
            .error_message
            .unwrap()
            .contains("busy right now")
    );
}

#[tokio::test]
async fn test_permanent_error_is_not_retried() {
    let input = measurements_input();
    let store = FakeStore::default();

    let mut client = MockClient::new();
    client.expect_complete().times(1).returning(|_| {
        Err(ModelError::Status {
            status: 400,
            message: "bad request".to_string(),
        })
    });

    let pipeline = RecommendationPipeline::new(Some(client), store.clone(), &test_config());
    let result = pipeline.get_recommendation(Uuid::new_v4(), &input).await;

    assert!(result.is_fallback);
    assert!(store.last_row().error_message.unwrap().contains("(400)"));
}

#[tokio::test]
async fn test_unparseable_output_falls_back_without_retry() {
    let input = measurements_input();
    let store = FakeStore::default();

    let mut client = MockClient::new();
    client
        .expect_complete()
        .times(1)
        .returning(|_| Ok("Just train harder and eat more protein.".to_string()));

    let pipeline = RecommendationPipeline::new(Some(client), store.clone(), &test_config());
    let result = pipeline.get_recommendation(Uuid::new_v4(), &input).await;

    assert!(result.is_fallback);
    assert_eq!(result.model, "fallback");

    let row = store.last_row();
    assert!(!row.success);
    assert!(row.error_message.unwrap().contains("unreadable"));
}

#[tokio::test]
async fn test_unconfigured_pipeline_goes_straight_to_fallback() {
    let input = measurements_input();
    let member_id = Uuid::new_v4();
    let store = FakeStore::default();

    let pipeline =
        RecommendationPipeline::<MockClient, _>::new(None, store.clone(), &test_config());

    let first = pipeline.get_recommendation(member_id, &input).await;
    assert!(first.is_fallback);
    assert!(!first.is_cached);
    assert_eq!(first.model, "fallback");

    let row = store.last_row();
    assert!(!row.success);
    assert!(row.is_fallback);
    assert!(row.error_message.is_none());

    // Fallback plans still populate the in-process tier
    let second = pipeline.get_recommendation(member_id, &input).await;
    assert!(second.is_cached);
    assert!(second.is_fallback);
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn test_store_failure_is_caught_at_the_boundary() {
    let input = measurements_input();
    let store = FakeStore::failing();

    let pipeline = RecommendationPipeline::<MockClient, _>::new(None, store, &test_config());
    let result = pipeline.get_recommendation(Uuid::new_v4(), &input).await;

    // The caller still gets a plan even when nothing can be persisted
    assert!(result.is_fallback);
    assert!(!result.plan.workout_plan.is_empty());
}

struct StubAfterImage;

#[async_trait]
impl fitclub_ai::after_image::AfterImageGenerator for StubAfterImage {
    async fn generate_after_image(
        &self,
        _bytes: &[u8],
        _content_type: &str,
        _goal: FitnessGoal,
    ) -> Option<String> {
        Some("data:image/png;base64,ZmFrZQ==".to_string())
    }
}

#[tokio::test]
async fn test_photo_requests_attach_an_after_image_when_configured() {
    let input = RecommendationInput::Photo {
        bytes: vec![1, 2, 3],
        content_type: "image/jpeg".to_string(),
    };
    let store = FakeStore::default();

    let pipeline = RecommendationPipeline::<MockClient, _>::new(None, store, &test_config())
        .with_after_image(Arc::new(StubAfterImage));

    let result = pipeline.get_recommendation(Uuid::new_v4(), &input).await;

    assert!(result.is_fallback);
    assert_eq!(
        result.after_image_url.as_deref(),
        Some("data:image/png;base64,ZmFrZQ==")
    );
}

#[tokio::test]
async fn test_measurement_requests_never_generate_an_after_image() {
    let store = FakeStore::default();

    let pipeline = RecommendationPipeline::<MockClient, _>::new(None, store, &test_config())
        .with_after_image(Arc::new(StubAfterImage));

    let result = pipeline
        .get_recommendation(Uuid::new_v4(), &measurements_input())
        .await;

    assert!(result.after_image_url.is_none());
}

#[test]
fn test_backoff_delays_double_and_never_decrease() {
    let base = Duration::from_millis(500);

    let delays: Vec<Duration> = (1..MAX_ATTEMPTS).map(|attempt| backoff_delay(base, attempt)).collect();

    assert_eq!(delays, vec![Duration::from_millis(500), Duration::from_millis(1000)]);
    for pair in delays.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}
