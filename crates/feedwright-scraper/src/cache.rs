//! Memoized "get or compute" store used for detail-page enrichment.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::OnceCell;

struct Slot<V> {
    created: Instant,
    cell: Arc<OnceCell<V>>,
}

/// In-memory cache keyed by string with a fixed validity window.
///
/// Concurrent callers asking for the same key share one computation, so a
/// detail page is fetched at most once per key while its entry is live.
/// A failed computation stores nothing; the next caller computes again.
pub struct DetailCache<V> {
    ttl: Duration,
    slots: Mutex<HashMap<String, Slot<V>>>,
}

impl<V: Clone> DetailCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the live value for `key`, computing and storing it if absent.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `compute`; nothing is stored in that case.
    pub async fn try_get<E, F, Fut>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.slot_for(key);
        let value = cell.get_or_try_init(compute).await?;
        Ok(value.clone())
    }

    /// Number of stored slots, including ones whose computation is in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot_for(&self, key: &str) -> Arc<OnceCell<V>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        let ttl = self.ttl;

        if let Some(slot) = slots.get(key) {
            if slot.is_live(now, ttl) {
                return Arc::clone(&slot.cell);
            }
        }

        slots.retain(|_, slot| slot.is_live(now, ttl));

        let cell = Arc::new(OnceCell::new());
        slots.insert(
            key.to_owned(),
            Slot {
                created: now,
                cell: Arc::clone(&cell),
            },
        );
        cell
    }
}

impl<V> Slot<V> {
    /// A filled slot lives for `ttl`. An empty one lives while some caller
    /// still holds it, so an in-flight computation is shared even with a
    /// zero TTL; once everyone has let go it was a failure and is dropped.
    fn is_live(&self, now: Instant, ttl: Duration) -> bool {
        if self.cell.initialized() {
            now.duration_since(self.created) < ttl
        } else {
            Arc::strong_count(&self.cell) > 1
        }
    }
}
