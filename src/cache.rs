use super::*;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct CachePolicy {
  pub(crate) fresh_secs: u64,
  #[serde(default = "CachePolicy::default_max_entries")]
  pub(crate) max_entries: u64,
  pub(crate) retain_secs: u64,
}

impl CachePolicy {
  pub(crate) fn default_max_entries() -> u64 {
    10_000
  }

  fn fresh(self) -> Duration {
    Duration::from_secs(self.fresh_secs)
  }

  fn retain(self) -> Duration {
    Duration::from_secs(self.retain_secs.max(self.fresh_secs))
  }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Lookup<V> {
  Fresh(V),
  Miss,
  Stale { refresh: bool, value: V },
}

struct CacheEntry<V> {
  inserted_at: Instant,
  refreshing: AtomicBool,
  value: V,
}

/// Time-boxed cache with a fresh window, during which values are served as
/// is, and a longer retain window, during which values are served stale
/// while one caller refreshes them. Entries expire after the retain window
/// whether or not they are read again.
pub(crate) struct Cache<K, V> {
  entries: moka::future::Cache<K, Arc<CacheEntry<V>>>,
  policy: CachePolicy,
}

impl<K, V> Cache<K, V>
where
  K: Eq + Hash + Send + Sync + 'static,
  V: Clone + Send + Sync + 'static,
{
  pub(crate) async fn get(&self, key: &K) -> Lookup<V> {
    let Some(entry) = self.entries.get(key).await else {
      return Lookup::Miss;
    };

    let age = entry.inserted_at.elapsed();

    if age < self.policy.fresh() {
      return Lookup::Fresh(entry.value.clone());
    }

    if age < self.policy.retain() {
      return Lookup::Stale {
        refresh: !entry.refreshing.swap(true, atomic::Ordering::SeqCst),
        value: entry.value.clone(),
      };
    }

    self.entries.invalidate(key).await;

    Lookup::Miss
  }

  pub(crate) async fn insert(&self, key: K, value: V) {
    self
      .entries
      .insert(
        key,
        Arc::new(CacheEntry {
          inserted_at: Instant::now(),
          refreshing: AtomicBool::new(false),
          value,
        }),
      )
      .await;
  }

  pub(crate) fn new(policy: CachePolicy) -> Self {
    Self {
      entries: moka::future::Cache::builder()
        .max_capacity(policy.max_entries)
        .time_to_live(policy.retain())
        .build(),
      policy,
    }
  }

  /// Clears the in-flight marker after a failed refresh so a later reader
  /// can try again.
  pub(crate) async fn release(&self, key: &K) {
    if let Some(entry) = self.entries.get(key).await {
      entry.refreshing.store(false, atomic::Ordering::SeqCst);
    }
  }
}
