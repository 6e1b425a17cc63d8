use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::accommodation::AccommodationId;

/// Keyed mutex registry: one critical section per accommodation aggregate.
/// Mutations that read-then-write an aggregate (interval add/remove,
/// reservation transitions) serialize here; snapshot reads never take it.
#[derive(Default)]
pub(crate) struct AggregateLocks {
    inner: DashMap<AccommodationId, Arc<Mutex<()>>>,
}

impl AggregateLocks {
    pub(crate) fn handle(&self, id: AccommodationId) -> Arc<Mutex<()>> {
        self.inner.entry(id).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_aggregate_shares_one_lock() {
        let locks = AggregateLocks::default();
        let a = locks.handle(AccommodationId(1));
        let b = locks.handle(AccommodationId(1));
        let guard = a.lock().await;
        assert!(b.try_lock().is_err());
        drop(guard);
        assert!(b.try_lock().is_ok());
    }

    #[tokio::test]
    async fn different_aggregates_do_not_contend() {
        let locks = AggregateLocks::default();
        let a = locks.handle(AccommodationId(1));
        let b = locks.handle(AccommodationId(2));
        let _guard = a.lock().await;
        assert!(b.try_lock().is_ok());
    }
}
