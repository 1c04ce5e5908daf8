use std::{collections::HashMap, future::Future};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use super::actions::ActionError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: &'static str,
    pub page: u32,
    pub page_size: u32,
}

impl QueryKey {
    pub fn new(resource: &'static str, page: u32, page_size: u32) -> Self {
        Self {
            resource,
            page,
            page_size,
        }
    }
}

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, ActionError>>>;

enum Slot<V: Clone> {
    Ready(V),
    Pending {
        generation: u64,
        fetch: SharedFetch<V>,
    },
}

struct Slots<V: Clone> {
    entries: HashMap<QueryKey, Slot<V>>,
    generation: u64,
}

/// Client-side query cache.
///
/// Identical keys requested while a fetch is in flight join that fetch.
/// Invalidation drops ready and pending entries alike; a pending fetch that
/// finishes after being invalidated hands its result to its callers but never
/// writes it back.
pub struct QueryCache<V: Clone> {
    slots: Mutex<Slots<V>>,
}

impl<V> Default for QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Slots {
                entries: HashMap::new(),
                generation: 0,
            }),
        }
    }

    pub async fn fetch<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<V, ActionError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ActionError>> + Send + 'static,
    {
        let (generation, fetch) = {
            let mut slots = self.slots.lock().await;

            match slots.entries.get(&key) {
                Some(Slot::Ready(value)) => return Ok(value.clone()),
                Some(Slot::Pending { generation, fetch }) => (*generation, fetch.clone()),
                None => {
                    slots.generation += 1;
                    let generation = slots.generation;
                    let fetch = fetcher().boxed().shared();
                    slots.entries.insert(
                        key.clone(),
                        Slot::Pending {
                            generation,
                            fetch: fetch.clone(),
                        },
                    );
                    (generation, fetch)
                }
            }
        };

        let result = fetch.await;

        let mut slots = self.slots.lock().await;
        let current = matches!(
            slots.entries.get(&key),
            Some(Slot::Pending { generation: g, .. }) if *g == generation
        );
        if current {
            match &result {
                Ok(value) => {
                    slots.entries.insert(key, Slot::Ready(value.clone()));
                }
                Err(_) => {
                    slots.entries.remove(&key);
                }
            }
        }

        result
    }

    /// Settled value for `key`, if any.
    pub async fn get(&self, key: &QueryKey) -> Option<V> {
        match self.slots.lock().await.entries.get(key) {
            Some(Slot::Ready(value)) => Some(value.clone()),
            _ => None,
        }
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        self.slots.lock().await.entries.remove(key);
    }

    /// Drops every entry whose key starts with `resource`.
    pub async fn invalidate_resource(&self, resource: &str) {
        let mut slots = self.slots.lock().await;
        slots.entries.retain(|key, _| key.resource != resource);
        tracing::debug!(resource, "query cache invalidated");
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
