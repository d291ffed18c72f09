use async_trait::async_trait;
use chrono::{Duration, Utc};
use eyre::Result;
use uuid::Uuid;

use fitclub_db::DbPool;
use fitclub_db::models::DbRecommendationLog;

/// One audit/cache row before it is appended.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub member_id: Uuid,
    pub input_hash: String,
    pub success: bool,
    pub is_fallback: bool,
    pub model: String,
    pub response: String,
    pub error_message: Option<String>,
    pub duration_ms: i64,
}

/// Persisted tier behind the pipeline: an append-only log that doubles as
/// the durable cache. Readers take the most recent successful row inside
/// the freshness window; nothing is ever updated in place.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn find_recent_success(
        &self,
        member_id: Uuid,
        input_hash: &str,
        max_age_hours: i64,
    ) -> Result<Option<DbRecommendationLog>>;

    async fn append(&self, entry: NewLogEntry) -> Result<()>;
}

pub struct PgRecommendationStore {
    pool: DbPool,
}

impl PgRecommendationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    async fn find_recent_success(
        &self,
        member_id: Uuid,
        input_hash: &str,
        max_age_hours: i64,
    ) -> Result<Option<DbRecommendationLog>> {
        let cutoff = Utc::now() - Duration::hours(max_age_hours);

        fitclub_db::repositories::recommendation::find_recent_success(
            &self.pool, member_id, input_hash, cutoff,
        )
        .await
    }

    async fn append(&self, entry: NewLogEntry) -> Result<()> {
        fitclub_db::repositories::recommendation::append_log(
            &self.pool,
            entry.member_id,
            &entry.input_hash,
            entry.success,
            entry.is_fallback,
            &entry.model,
            &entry.response,
            entry.error_message.as_deref(),
            entry.duration_ms,
        )
        .await?;

        Ok(())
    }
}
