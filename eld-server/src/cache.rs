//! Store of planned trips.
//!
//! Each successful plan is kept whole under a fresh id so the export route
//! can re-render it later. Plans are immutable once stored; planning again
//! produces a new id rather than updating an old entry.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde::{Deserialize, Serialize};

use crate::domain::TripPlanResult;

/// Identifier of a stored plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(u64);

impl PlanId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlanId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(PlanId)
    }
}

/// Configuration for the plan cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a plan stays available after it was made.
    pub ttl: Duration,

    /// Maximum number of stored plans.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 1000,
        }
    }
}

/// Planned trips, keyed by [`PlanId`].
pub struct PlanCache {
    plans: MokaCache<PlanId, Arc<TripPlanResult>>,
    next_id: AtomicU64,
}

impl PlanCache {
    pub fn new(config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            plans,
            next_id: AtomicU64::new(1),
        }
    }

    /// Store a plan and return its new id.
    pub async fn insert(&self, plan: TripPlanResult) -> (PlanId, Arc<TripPlanResult>) {
        let id = PlanId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let plan = Arc::new(plan);
        self.plans.insert(id, plan.clone()).await;
        (id, plan)
    }

    /// Look up a plan. `None` once it has expired or been evicted.
    pub async fn get(&self, id: PlanId) -> Option<Arc<TripPlanResult>> {
        self.plans.get(&id).await
    }

    /// Number of stored plans (approximate, for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.plans.entry_count()
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
