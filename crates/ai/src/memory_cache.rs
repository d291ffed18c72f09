use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::RwLock;
use uuid::Uuid;

use fitclub_core::models::recommendation::RecommendationPlan;

/// A plan served out of the in-process tier.
#[derive(Debug, Clone)]
pub struct CachedPlan {
    pub plan: RecommendationPlan,
    pub model: String,
    pub is_fallback: bool,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    plan: RecommendationPlan,
    model: String,
    is_fallback: bool,
    expires_at: Instant,
}

/// Short-lived in-process cache in front of the persisted log store, so an
/// immediate repeat request by the same member skips the database round
/// trip. LRU bounds memory; expiry is checked on read, and expired entries
/// are dropped when touched.
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    ttl: Duration,
}

impl MemoryCache {
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(256) {
        Some(n) => n,
        None => unreachable!(),
    };

    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::DEFAULT_CAPACITY);

        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            ttl,
        }
    }

    fn cache_key(member_id: Uuid, input_hash: &str) -> String {
        format!("{member_id}:{input_hash}")
    }

    pub async fn get(&self, member_id: Uuid, input_hash: &str) -> Option<CachedPlan> {
        let key = Self::cache_key(member_id, input_hash);
        let mut store = self.store.write().await;

        let expired = match store.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Some(CachedPlan {
                    plan: entry.plan.clone(),
                    model: entry.model.clone(),
                    is_fallback: entry.is_fallback,
                });
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            store.pop(&key);
        }

        None
    }

    pub async fn put(
        &self,
        member_id: Uuid,
        input_hash: &str,
        plan: &RecommendationPlan,
        model: &str,
        is_fallback: bool,
    ) {
        let key = Self::cache_key(member_id, input_hash);
        let entry = CacheEntry {
            plan: plan.clone(),
            model: model.to_string(),
            is_fallback,
            expires_at: Instant::now() + self.ttl,
        };

        self.store.write().await.put(key, entry);
    }
}
