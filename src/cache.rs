//! In-memory cache of computed plans.
//!
//! Planning is deterministic, so responses are keyed by the request's input hash.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;

use crate::deco::PlanResponse;

/// Cache statistics for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Clone)]
pub struct PlanCache {
    plans: Cache<String, Arc<PlanResponse>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl PlanCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            plans: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return the cached plan for `key`, computing and storing it on a miss.
    ///
    /// Concurrent callers for the same key share one computation; only the
    /// caller whose future ran counts as a miss.
    pub async fn get_or_compute<F>(&self, key: &str, compute: F) -> Arc<PlanResponse>
    where
        F: Future<Output = PlanResponse>,
    {
        let entry = self
            .plans
            .entry_by_ref(key)
            .or_insert_with(async { Arc::new(compute.await) })
            .await;

        if entry.is_fresh() {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Plan cache hit for {}", key);
        }
        entry.into_value()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.plans.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
