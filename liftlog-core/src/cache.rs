use chrono::NaiveDate;
use log::trace;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::db::models::{UserId, WorkoutDetail};

/// Per-day workout views, keyed by owner and date.
///
/// Any successful mutation clears every entry. A fill that raced with an
/// invalidation is dropped instead of stored.
#[derive(Default)]
pub struct DashboardCache {
    entries: RwLock<HashMap<(UserId, NaiveDate), Arc<Vec<WorkoutDetail>>>>,
    generation: AtomicU64,
}

impl DashboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, owner: &UserId, date: NaiveDate) -> Option<Arc<Vec<WorkoutDetail>>> {
        self.entries
            .read()
            .await
            .get(&(owner.clone(), date))
            .cloned()
    }

    /// Token to pass to [`DashboardCache::fill`] once the view has been loaded.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub async fn fill(
        &self,
        generation: u64,
        owner: &UserId,
        date: NaiveDate,
        view: Arc<Vec<WorkoutDetail>>,
    ) {
        let mut entries = self.entries.write().await;
        if self.generation() != generation {
            trace!("Skipping stale dashboard fill for {} on {}", owner, date);
            return;
        }
        entries.insert((owner.clone(), date), view);
    }

    pub async fn invalidate(&self) {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, d).unwrap()
    }

    #[tokio::test]
    async fn fill_then_get() {
        let cache = DashboardCache::new();
        let owner = UserId::new("user_a");
        cache
            .fill(cache.generation(), &owner, day(16), Arc::new(vec![]))
            .await;
        assert!(cache.get(&owner, day(16)).await.is_some());
        assert!(cache.get(&owner, day(17)).await.is_none());
        assert!(cache.get(&UserId::new("user_b"), day(16)).await.is_none());
    }

    #[tokio::test]
    async fn invalidate_clears_everything() {
        let cache = DashboardCache::new();
        let owner = UserId::new("user_a");
        cache
            .fill(cache.generation(), &owner, day(16), Arc::new(vec![]))
            .await;
        cache
            .fill(cache.generation(), &owner, day(18), Arc::new(vec![]))
            .await;
        assert_eq!(cache.len().await, 2);

        cache.invalidate().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn stale_fill_is_dropped() {
        let cache = DashboardCache::new();
        let owner = UserId::new("user_a");
        let token = cache.generation();
        cache.invalidate().await;
        cache.fill(token, &owner, day(16), Arc::new(vec![])).await;
        assert!(cache.get(&owner, day(16)).await.is_none());
    }
}
