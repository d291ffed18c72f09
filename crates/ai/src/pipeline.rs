//! # Recommendation Pipeline
//!
//! Orchestrates one recommendation request end to end:
//!
//! 1. In-process cache lookup (member + input hash)
//! 2. Persisted log lookup, filtered to fresh successful rows
//! 3. External model call with bounded exponential-backoff retries
//!    (HTTP 429/503 and timeouts retry; anything else falls through)
//! 4. Rule-based fallback whenever the call is skipped, exhausted, or
//!    unparseable
//! 5. One appended log row per non-cached invocation
//! 6. In-process cache population for the returned plan
//!
//! Every path terminates in a returned plan. Unexpected internal errors are
//! caught at this boundary, logged with the partial duration, and converted
//! into a generic fallback so the member-facing flow never hard-fails.
//!
//! Concurrent identical requests are not deduplicated: two simultaneous
//! misses may both call the model and both append a row. Both rows are
//! equivalent and readers always take the most recent one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{debug, error, warn};
use uuid::Uuid;

use fitclub_core::models::recommendation::{FitnessGoal, Recommendation, RecommendationPlan};

use crate::after_image::AfterImageGenerator;
use crate::client::{InlineImage, ModelError, ModelRequest, VisionClient};
use crate::config::AiConfig;
use crate::fallback::{self, FALLBACK_MODEL};
use crate::input::RecommendationInput;
use crate::memory_cache::MemoryCache;
use crate::parse;
use crate::store::{NewLogEntry, RecommendationStore};

/// Total external call attempts for one request, counting the first.
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay before the retry following `attempt` (1-based): the configured
/// base, doubling each attempt. Delays never decrease.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.saturating_pow(attempt.saturating_sub(1))
}

pub struct RecommendationPipeline<C: VisionClient, S: RecommendationStore> {
    client: Option<C>,
    store: S,
    memory: MemoryCache,
    after_image: Option<Arc<dyn AfterImageGenerator>>,
    cache_ttl_hours: i64,
    retry_base_delay: Duration,
}

impl<C: VisionClient, S: RecommendationStore> RecommendationPipeline<C, S> {
    /// `client: None` puts the pipeline in fallback-only mode (no
    /// credentials configured); everything else still works.
    pub fn new(client: Option<C>, store: S, config: &AiConfig) -> Self {
        Self {
            client,
            store,
            memory: MemoryCache::new(config.memory_cache_capacity, config.memory_cache_ttl),
            after_image: None,
            cache_ttl_hours: config.cache_ttl_hours,
            retry_base_delay: config.retry_base_delay,
        }
    }

    pub fn with_after_image(mut self, generator: Arc<dyn AfterImageGenerator>) -> Self {
        self.after_image = Some(generator);
        self
    }

    /// Runs one recommendation request. Input-shape validation happens in
    /// [`RecommendationInput::from_parts`] before this point; from here on
    /// every failure degrades to a fallback plan instead of surfacing.
    pub async fn get_recommendation(
        &self,
        member_id: Uuid,
        input: &RecommendationInput,
    ) -> Recommendation {
        let started = Instant::now();
        let input_hash = input.cache_key();

        // Tier 1: in-process cache
        if let Some(cached) = self.memory.get(member_id, &input_hash).await {
            debug!("Recommendation served from memory cache: member={member_id}");
            return Recommendation {
                plan: cached.plan,
                model: cached.model,
                is_fallback: cached.is_fallback,
                is_cached: true,
                after_image_url: None,
            };
        }

        // Tier 2: persisted log, fresh successful rows only. A read failure
        // here degrades to a miss rather than failing the request.
        match self
            .store
            .find_recent_success(member_id, &input_hash, self.cache_ttl_hours)
            .await
        {
            Ok(Some(row)) => match serde_json::from_str::<RecommendationPlan>(&row.response) {
                Ok(plan) => {
                    debug!("Recommendation served from persisted cache: member={member_id}");
                    self.memory
                        .put(member_id, &input_hash, &plan, &row.model, row.is_fallback)
                        .await;
                    return Recommendation {
                        plan,
                        model: row.model,
                        is_fallback: row.is_fallback,
                        is_cached: true,
                        after_image_url: None,
                    };
                }
                Err(err) => {
                    warn!("Stored recommendation row was not parseable, ignoring it: {err}");
                }
            },
            Ok(None) => {}
            Err(err) => {
                warn!("Persisted cache lookup failed, treating as miss: {err}");
            }
        }

        match self.run_miss(member_id, input, &input_hash, started).await {
            Ok(recommendation) => recommendation,
            Err(err) => {
                // Outermost boundary: nothing past input validation may fail
                error!(
                    "Recommendation pipeline error after {}ms, returning generic fallback: {err}",
                    started.elapsed().as_millis()
                );

                let plan = fallback::generic_fallback_plan();
                let entry = NewLogEntry {
                    member_id,
                    input_hash: input_hash.clone(),
                    success: false,
                    is_fallback: true,
                    model: FALLBACK_MODEL.to_string(),
                    response: serde_json::to_string(&plan).unwrap_or_default(),
                    error_message: Some(err.to_string()),
                    duration_ms: started.elapsed().as_millis() as i64,
                };
                if let Err(log_err) = self.store.append(entry).await {
                    error!("Could not append recommendation log row: {log_err}");
                }

                Recommendation {
                    plan,
                    model: FALLBACK_MODEL.to_string(),
                    is_fallback: true,
                    is_cached: false,
                    after_image_url: None,
                }
            }
        }
    }

    async fn run_miss(
        &self,
        member_id: Uuid,
        input: &RecommendationInput,
        input_hash: &str,
        started: Instant,
    ) -> eyre::Result<Recommendation> {
        let (plan, model, is_fallback, error_message) = match &self.client {
            None => {
                debug!("External model unconfigured, generating rule-based plan");
                (
                    fallback::generate_fallback(input),
                    FALLBACK_MODEL.to_string(),
                    true,
                    None,
                )
            }
            Some(client) => match self.call_with_retry(client, input).await {
                Ok(text) => match parse::parse_plan(&text) {
                    Some(plan) => (plan, client.model_name().to_string(), false, None),
                    None => {
                        warn!("Model output was not parseable as a plan, falling back");
                        (
                            fallback::generate_fallback(input),
                            FALLBACK_MODEL.to_string(),
                            true,
                            Some(
                                "The recommendation service returned an unreadable answer; \
                                 showing a standard plan instead."
                                    .to_string(),
                            ),
                        )
                    }
                },
                Err(err) => {
                    warn!("External model call failed, falling back: {err}");
                    (
                        fallback::generate_fallback(input),
                        FALLBACK_MODEL.to_string(),
                        true,
                        Some(err.user_message()),
                    )
                }
            },
        };

        let after_image_url = self.maybe_after_image(input).await;

        let entry = NewLogEntry {
            member_id,
            input_hash: input_hash.to_string(),
            success: !is_fallback,
            is_fallback,
            model: model.clone(),
            response: serde_json::to_string(&plan)?,
            error_message,
            duration_ms: started.elapsed().as_millis() as i64,
        };
        self.store.append(entry).await?;

        self.memory
            .put(member_id, input_hash, &plan, &model, is_fallback)
            .await;

        Ok(Recommendation {
            plan,
            model,
            is_fallback,
            is_cached: false,
            after_image_url,
        })
    }

    async fn call_with_retry(
        &self,
        client: &C,
        input: &RecommendationInput,
    ) -> Result<String, ModelError> {
        let request = build_request(input);
        let mut attempt = 1;

        loop {
            match client.complete(&request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < MAX_ATTEMPTS => {
                    let delay = backoff_delay(self.retry_base_delay, attempt);
                    debug!(
                        "Transient model error on attempt {attempt}/{MAX_ATTEMPTS}, retrying in {delay:?}: {err}"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn maybe_after_image(&self, input: &RecommendationInput) -> Option<String> {
        let generator = self.after_image.as_ref()?;

        match input {
            RecommendationInput::Photo {
                bytes,
                content_type,
            } => {
                generator
                    .generate_after_image(bytes, content_type, FitnessGoal::GeneralFitness)
                    .await
            }
            RecommendationInput::Measurements(_) => None,
        }
    }
}

fn build_request(input: &RecommendationInput) -> ModelRequest {
    match input {
        RecommendationInput::Measurements(m) => ModelRequest {
            prompt: format!(
                "You are a fitness coach. Create a recommendation for this member: \
                 height {:.0} cm, weight {:.0} kg, age {}, gender {}, goal {}, \
                 equipment {}, {} training days per week. \
                 Answer with a single JSON object with exactly these keys: \
                 \"summary\" (string), \"workoutPlan\" (array of strings, one per \
                 training day), \"nutritionTips\" (array of strings), \
                 \"warnings\" (array of strings, may be empty). No other text.",
                m.height_cm,
                m.weight_kg,
                m.age,
                m.gender.as_str(),
                m.goal.as_str(),
                m.equipment.as_str(),
                m.training_days,
            ),
            image: None,
        },
        RecommendationInput::Photo {
            bytes,
            content_type,
        } => ModelRequest {
            prompt: "You are a fitness coach. Assess the physique in this photo and create a \
                     recommendation. Answer with a single JSON object with exactly these keys: \
                     \"summary\" (string), \"workoutPlan\" (array of strings), \
                     \"nutritionTips\" (array of strings), \"warnings\" (array of strings, may \
                     be empty). No other text."
                .to_string(),
            image: Some(InlineImage {
                bytes: bytes.clone(),
                content_type: content_type.clone(),
            }),
        },
    }
}
