//! Keyed query store: stale-while-revalidate caching for backend data.
//!
//! Inspired by TanStack Query, re-shaped for a poll-driven terminal app: an
//! explicitly constructed [`QueryStore`] owns every cache entry, views
//! register interest with [`QueryStore::subscribe`] and observe state by
//! polling the returned [`QueryHandle`] on the event-loop tick.
//!
//! # Example
//!
//! ```ignore
//! let store = QueryStore::new();
//! let api = api_client.clone();
//! let mut cart = store.subscribe(
//!   keys::cart(),
//!   move || {
//!     let api = api.clone();
//!     async move { api.get_cart().await }
//!   },
//!   QueryOptions::default().with_refetch_interval(Duration::from_secs(30)),
//! );
//!
//! // In the event loop tick
//! store.tick();
//! if cart.poll() {
//!   // State changed, re-render
//! }
//!
//! // In render
//! let snapshot = cart.snapshot();
//! ```

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::ApiError;

use super::key::QueryKey;

/// Observable state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
  /// No fetch has ever been issued for this entry.
  Idle,
  /// A fetch is in flight. Previously committed data stays visible.
  Loading,
  /// The latest settled fetch succeeded.
  Success,
  /// The latest settled fetch failed. Last good data stays visible.
  Error,
}

/// Per-subscription refetch policy.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
  /// How long committed data counts as fresh. Stale entries refetch in the
  /// background on the next subscription or focus event.
  pub stale_time: Duration,
  /// Forced periodic refetch while at least one subscriber is mounted.
  pub refetch_interval: Option<Duration>,
  /// Refetch on every new subscription, fresh or not.
  pub refetch_on_mount: bool,
  /// Refetch stale entries when the terminal regains focus.
  pub refetch_on_focus: bool,
}

impl Default for QueryOptions {
  fn default() -> Self {
    Self {
      stale_time: Duration::from_secs(30),
      refetch_interval: None,
      refetch_on_mount: false,
      refetch_on_focus: false,
    }
  }
}

impl QueryOptions {
  pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
    self.stale_time = stale_time;
    self
  }

  pub fn with_refetch_interval(mut self, interval: Duration) -> Self {
    self.refetch_interval = Some(interval);
    self
  }

  pub fn with_refetch_on_mount(mut self) -> Self {
    self.refetch_on_mount = true;
    self
  }

  pub fn with_refetch_on_focus(mut self) -> Self {
    self.refetch_on_focus = true;
    self
  }
}

type ErasedFetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<Value, ApiError>> + Send + Sync>;

/// One cache entry. Owned exclusively by the store; views only see
/// [`QuerySnapshot`]s taken through a handle.
struct Entry {
  key: QueryKey,
  data: Option<Value>,
  error: Option<Arc<ApiError>>,
  fetched_at: Option<Instant>,
  fetch_started_at: Option<Instant>,
  options: QueryOptions,
  fetcher: ErasedFetcher,
  /// Sequence number of the most recently issued fetch.
  issued_seq: u64,
  /// Highest sequence number that has settled (committed or errored).
  settled_seq: u64,
  /// Bumped on every observable transition; handles diff against it.
  version: u64,
  subscribers: usize,
  idle_since: Option<Instant>,
}

impl Entry {
  fn new(key: QueryKey, fetcher: ErasedFetcher, options: QueryOptions) -> Self {
    Self {
      key,
      data: None,
      error: None,
      fetched_at: None,
      fetch_started_at: None,
      options,
      fetcher,
      issued_seq: 0,
      settled_seq: 0,
      version: 0,
      subscribers: 0,
      idle_since: None,
    }
  }

  fn in_flight(&self) -> bool {
    self.issued_seq > self.settled_seq
  }

  fn is_stale(&self) -> bool {
    match self.fetched_at {
      Some(at) => at.elapsed() > self.options.stale_time,
      None => true,
    }
  }

  fn status(&self) -> QueryStatus {
    if self.in_flight() {
      QueryStatus::Loading
    } else if self.error.is_some() {
      QueryStatus::Error
    } else if self.data.is_some() {
      QueryStatus::Success
    } else {
      QueryStatus::Idle
    }
  }
}

struct StoreInner {
  entries: Mutex<HashMap<String, Entry>>,
  /// Inactivity window after which zero-subscriber entries are evicted.
  gc_time: Duration,
}

impl StoreInner {
  fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Issue a fetch for an entry, superseding any in-flight request.
  ///
  /// The spawned task settles through the store lock: a result whose
  /// sequence number is not above the highest already-settled one is
  /// discarded, so the last *issued* request always wins, regardless of
  /// arrival order.
  fn spawn_fetch(inner: &Arc<StoreInner>, digest: &str, entry: &mut Entry) {
    entry.issued_seq += 1;
    entry.fetch_started_at = Some(Instant::now());
    entry.version += 1;

    let seq = entry.issued_seq;
    let fetcher = Arc::clone(&entry.fetcher);
    let inner = Arc::clone(inner);
    let digest = digest.to_string();

    debug!(key = %entry.key, seq, "issuing fetch");

    tokio::spawn(async move {
      let result = fetcher().await;

      let mut entries = inner.lock();
      let Some(entry) = entries.get_mut(&digest) else {
        // Entry was evicted while the request was in flight.
        return;
      };
      if seq <= entry.settled_seq {
        debug!(key = %entry.key, seq, "discarding superseded response");
        return;
      }

      entry.settled_seq = seq;
      match result {
        Ok(value) => {
          entry.data = Some(value);
          entry.error = None;
          entry.fetched_at = Some(Instant::now());
        }
        Err(err) => {
          // Keep last known good data; only the error field changes.
          warn!(key = %entry.key, error = %err, "fetch failed");
          entry.error = Some(Arc::new(err));
        }
      }
      entry.version += 1;
    });
  }
}

/// Process-wide cache of backend query results.
///
/// Explicitly constructed and handed to whoever needs it (no global
/// singleton), so tests can run isolated stores side by side. Cloning is
/// cheap and shares the entry map.
#[derive(Clone)]
pub struct QueryStore {
  inner: Arc<StoreInner>,
}

impl Default for QueryStore {
  fn default() -> Self {
    Self::new()
  }
}

impl QueryStore {
  pub fn new() -> Self {
    Self::with_gc_time(Duration::from_secs(300))
  }

  /// Create a store with a custom eviction window for abandoned entries.
  pub fn with_gc_time(gc_time: Duration) -> Self {
    Self {
      inner: Arc::new(StoreInner {
        entries: Mutex::new(HashMap::new()),
        gc_time,
      }),
    }
  }

  /// Register interest in a key.
  ///
  /// Creates the entry on first subscription and triggers the fetcher when
  /// the entry is new, stale, or `refetch_on_mount` asks for it; a fetch
  /// already in flight is reused (one request per key). The handle reports
  /// the current `{data, error, status}` immediately and observes later
  /// transitions via [`QueryHandle::poll`]. Dropping the handle
  /// unsubscribes without cancelling in-flight work.
  pub fn subscribe<T, F, Fut>(
    &self,
    key: QueryKey,
    fetcher: F,
    options: QueryOptions,
  ) -> QueryHandle<T>
  where
    T: Serialize + DeserializeOwned + Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
  {
    let erased: ErasedFetcher = Arc::new(move || {
      let fut = fetcher();
      Box::pin(async move {
        let value = fut.await?;
        serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
      })
    });

    let digest = key.digest();
    let mut entries = self.inner.lock();
    let entry = entries
      .entry(digest.clone())
      .or_insert_with(|| Entry::new(key, Arc::clone(&erased), options));

    entry.subscribers += 1;
    entry.idle_since = None;
    // The latest subscriber's fetcher and options win.
    entry.fetcher = erased;
    entry.options = options;

    let wants_fetch = entry.data.is_none() || entry.options.refetch_on_mount || entry.is_stale();
    if wants_fetch && !entry.in_flight() {
      StoreInner::spawn_fetch(&self.inner, &digest, entry);
    }

    let seen_version = entry.version;
    drop(entries);

    QueryHandle {
      inner: Arc::clone(&self.inner),
      digest,
      seen_version,
      decoded: None,
      _marker: PhantomData,
    }
  }

  /// Mark every entry whose key starts with `prefix` as stale, refetching
  /// those that currently have subscribers. A refetch issued here supersedes
  /// any in-flight request for the same key.
  pub fn invalidate(&self, prefix: &QueryKey) {
    let mut entries = self.inner.lock();
    for (digest, entry) in entries.iter_mut() {
      if !entry.key.starts_with(prefix) {
        continue;
      }
      debug!(key = %entry.key, "invalidated");
      entry.fetched_at = None;
      if entry.subscribers > 0 {
        StoreInner::spawn_fetch(&self.inner, digest, entry);
      }
    }
  }

  /// Drive interval refetches and evict abandoned entries. Call once per
  /// event-loop tick.
  pub fn tick(&self) {
    let gc_time = self.inner.gc_time;
    let mut entries = self.inner.lock();

    for (digest, entry) in entries.iter_mut() {
      let Some(interval) = entry.options.refetch_interval else {
        continue;
      };
      if entry.subscribers == 0 || entry.in_flight() {
        continue;
      }
      let due = entry
        .fetch_started_at
        .map(|at| at.elapsed() >= interval)
        .unwrap_or(true);
      if due {
        StoreInner::spawn_fetch(&self.inner, digest, entry);
      }
    }

    entries.retain(|_, entry| {
      if entry.subscribers > 0 {
        return true;
      }
      match entry.idle_since {
        Some(since) if since.elapsed() >= gc_time => {
          debug!(key = %entry.key, "evicting idle entry");
          false
        }
        _ => true,
      }
    });
  }

  /// Refetch stale, subscribed entries that opted into focus refetching.
  /// Call when the terminal regains focus.
  pub fn notify_focus(&self) {
    let mut entries = self.inner.lock();
    for (digest, entry) in entries.iter_mut() {
      if entry.options.refetch_on_focus
        && entry.subscribers > 0
        && entry.is_stale()
        && !entry.in_flight()
      {
        StoreInner::spawn_fetch(&self.inner, digest, entry);
      }
    }
  }

  /// Whether an entry exists for this key (subscribed or not).
  pub fn contains(&self, key: &QueryKey) -> bool {
    self.inner.lock().contains_key(&key.digest())
  }
}

/// Point-in-time view of an entry, as seen through a typed handle.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T> {
  pub status: QueryStatus,
  pub data: Option<Arc<T>>,
  pub error: Option<Arc<ApiError>>,
}

impl<T> QuerySnapshot<T> {
  fn idle() -> Self {
    Self {
      status: QueryStatus::Idle,
      data: None,
      error: None,
    }
  }

  pub fn is_loading(&self) -> bool {
    self.status == QueryStatus::Loading
  }

  pub fn is_error(&self) -> bool {
    self.status == QueryStatus::Error
  }

  pub fn data(&self) -> Option<&T> {
    self.data.as_deref()
  }
}

/// A view's registration of interest in one query key.
///
/// Holds no data itself; [`QueryHandle::snapshot`] reads through to the
/// store. Dropping the handle unsubscribes; the entry lingers for the
/// store's gc window so remounts can reuse it.
pub struct QueryHandle<T> {
  inner: Arc<StoreInner>,
  digest: String,
  seen_version: u64,
  decoded: Option<(u64, Arc<T>)>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> QueryHandle<T> {
  /// Check for a state change since the last poll. Returns `true` when the
  /// entry transitioned, meaning a re-render is due.
  pub fn poll(&mut self) -> bool {
    let entries = self.inner.lock();
    let Some(entry) = entries.get(&self.digest) else {
      return false;
    };
    if entry.version != self.seen_version {
      self.seen_version = entry.version;
      true
    } else {
      false
    }
  }

  /// Current `{status, data, error}` for the subscribed key.
  ///
  /// Decoding the committed value is cached per entry version, so repeated
  /// snapshots between transitions are cheap.
  pub fn snapshot(&mut self) -> QuerySnapshot<T> {
    let entries = self.inner.lock();
    let Some(entry) = entries.get(&self.digest) else {
      return QuerySnapshot::idle();
    };

    let status = entry.status();
    let error = entry.error.clone();
    let version = entry.version;

    let cached = self
      .decoded
      .as_ref()
      .filter(|(v, _)| *v == version)
      .map(|(_, data)| Arc::clone(data));
    let data = match cached {
      Some(data) => Some(data),
      None => match &entry.data {
        Some(value) => match serde_json::from_value::<T>(value.clone()) {
          Ok(decoded) => {
            let decoded = Arc::new(decoded);
            self.decoded = Some((version, Arc::clone(&decoded)));
            Some(decoded)
          }
          Err(err) => {
            warn!(key = %entry.key, error = %err, "cached value does not match subscriber type");
            None
          }
        },
        None => None,
      },
    };

    QuerySnapshot {
      status,
      data,
      error,
    }
  }

  /// Convenience accessor for the committed data, if any.
  pub fn data(&mut self) -> Option<Arc<T>> {
    self.snapshot().data
  }

  /// Force a refetch, superseding any in-flight request for this key.
  pub fn refetch(&self) {
    let mut entries = self.inner.lock();
    if let Some(entry) = entries.get_mut(&self.digest) {
      StoreInner::spawn_fetch(&self.inner, &self.digest, entry);
    }
  }
}

impl<T> Drop for QueryHandle<T> {
  fn drop(&mut self) {
    let mut entries = self.inner.lock();
    if let Some(entry) = entries.get_mut(&self.digest) {
      entry.subscribers = entry.subscribers.saturating_sub(1);
      if entry.subscribers == 0 {
        entry.idle_since = Some(Instant::now());
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::query::key::keys;
  use std::sync::atomic::{AtomicU32, Ordering};

  fn counting_fetcher(
    counter: Arc<AtomicU32>,
  ) -> impl Fn() -> futures::future::Ready<Result<u32, ApiError>> + Send + Sync + 'static {
    move || futures::future::ready(Ok(counter.fetch_add(1, Ordering::SeqCst) + 1))
  }

  #[tokio::test]
  async fn test_concurrent_subscribers_share_one_fetch() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let c = Arc::clone(&counter);
    let mut first = store.subscribe(
      keys::cart(),
      move || {
        let c = Arc::clone(&c);
        async move {
          tokio::time::sleep(Duration::from_millis(30)).await;
          Ok::<_, ApiError>(c.fetch_add(1, Ordering::SeqCst) + 1)
        }
      },
      QueryOptions::default(),
    );
    let c = Arc::clone(&counter);
    let mut second = store.subscribe(
      keys::cart(),
      move || {
        let c = Arc::clone(&c);
        async move {
          tokio::time::sleep(Duration::from_millis(30)).await;
          Ok::<_, ApiError>(c.fetch_add(1, Ordering::SeqCst) + 1)
        }
      },
      QueryOptions::default(),
    );

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(first.data().as_deref(), Some(&1));
    assert_eq!(second.data().as_deref(), Some(&1));
  }

  #[tokio::test]
  async fn test_invalidate_prefix_refetches_matching_entries_only() {
    let store = QueryStore::new();
    let product_count = Arc::new(AtomicU32::new(0));
    let order_count = Arc::new(AtomicU32::new(0));

    let mut products = store.subscribe(
      keys::product_list(&Default::default()),
      counting_fetcher(Arc::clone(&product_count)),
      QueryOptions::default(),
    );
    let mut orders = store.subscribe(
      keys::orders(),
      counting_fetcher(Arc::clone(&order_count)),
      QueryOptions::default(),
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(products.data().as_deref(), Some(&1));
    assert_eq!(orders.data().as_deref(), Some(&1));

    store.invalidate(&keys::products());
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(product_count.load(Ordering::SeqCst), 2);
    assert_eq!(order_count.load(Ordering::SeqCst), 1);
    assert_eq!(products.data().as_deref(), Some(&2));
    assert_eq!(orders.data().as_deref(), Some(&1));
  }

  #[tokio::test]
  async fn test_superseded_response_never_overwrites_newer_data() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let c = Arc::clone(&counter);
    let mut handle = store.subscribe(
      keys::orders(),
      move || {
        let c = Arc::clone(&c);
        async move {
          let n = c.fetch_add(1, Ordering::SeqCst) + 1;
          if n == 1 {
            // First request resolves last.
            tokio::time::sleep(Duration::from_millis(80)).await;
            Ok::<_, ApiError>("first".to_string())
          } else {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok("second".to_string())
          }
        }
      },
      QueryOptions::default(),
    );

    tokio::time::sleep(Duration::from_millis(5)).await;
    handle.refetch();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(handle.data().as_deref().map(String::as_str), Some("second"));
  }

  #[tokio::test]
  async fn test_failed_fetch_preserves_last_good_data() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let c = Arc::clone(&counter);
    let mut handle = store.subscribe(
      keys::cart(),
      move || {
        let c = Arc::clone(&c);
        async move {
          if c.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok::<_, ApiError>(42u32)
          } else {
            Err(ApiError::Http {
              status: 500,
              status_text: "Internal Server Error".to_string(),
            })
          }
        }
      },
      QueryOptions::default(),
    );

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(handle.data().as_deref(), Some(&42));

    handle.refetch();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.status, QueryStatus::Error);
    assert!(snapshot.error.is_some());
    assert_eq!(snapshot.data.as_deref(), Some(&42));
  }

  #[tokio::test]
  async fn test_fresh_entry_serves_cache_without_refetch() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let first = store.subscribe(
      keys::orders(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;
    drop(first);

    // Remount within the stale window: served from cache, no new request.
    let mut second = store.subscribe(
      keys::orders(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(second.data().as_deref(), Some(&1));
  }

  #[tokio::test]
  async fn test_refetch_on_mount_forces_fetch() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let _first = store.subscribe(
      keys::orders(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    let _second = store.subscribe(
      keys::orders(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default().with_refetch_on_mount(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_unsubscribe_does_not_cancel_in_flight_fetch() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let c = Arc::clone(&counter);
    let handle = store.subscribe(
      keys::cart(),
      move || {
        let c = Arc::clone(&c);
        async move {
          tokio::time::sleep(Duration::from_millis(40)).await;
          Ok::<_, ApiError>(c.fetch_add(1, Ordering::SeqCst) + 1)
        }
      },
      QueryOptions::default(),
    );
    drop(handle);

    tokio::time::sleep(Duration::from_millis(80)).await;

    // The result settled into the unobserved entry; a remount reuses it.
    let mut remounted = store.subscribe(
      keys::cart(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default(),
    );
    assert_eq!(remounted.data().as_deref(), Some(&1));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_idle_entries_evicted_after_gc_window() {
    let store = QueryStore::with_gc_time(Duration::ZERO);
    let counter = Arc::new(AtomicU32::new(0));

    let key = keys::orders();
    let handle = store.subscribe(
      key.clone(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    store.tick();
    assert!(store.contains(&key));

    drop(handle);
    store.tick();
    assert!(!store.contains(&key));
  }

  #[tokio::test]
  async fn test_interval_refetch_fires_on_tick() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let _handle = store.subscribe(
      keys::cart(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default().with_refetch_interval(Duration::from_millis(10)),
    );
    tokio::time::sleep(Duration::from_millis(30)).await;

    store.tick();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn test_focus_refetch_only_when_stale() {
    let store = QueryStore::new();
    let counter = Arc::new(AtomicU32::new(0));

    let _handle = store.subscribe(
      keys::orders(),
      counting_fetcher(Arc::clone(&counter)),
      QueryOptions::default()
        .with_stale_time(Duration::ZERO)
        .with_refetch_on_focus(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    store.notify_focus();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    let fresh = Arc::new(AtomicU32::new(0));
    let _fresh_handle = store.subscribe(
      keys::cart(),
      counting_fetcher(Arc::clone(&fresh)),
      QueryOptions::default()
        .with_stale_time(Duration::from_secs(60))
        .with_refetch_on_focus(),
    );
    tokio::time::sleep(Duration::from_millis(20)).await;

    store.notify_focus();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(fresh.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_snapshot_reports_loading_then_success() {
    let store = QueryStore::new();

    let mut handle = store.subscribe(
      keys::cart(),
      || async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok::<_, ApiError>(7u32)
      },
      QueryOptions::default(),
    );

    assert_eq!(handle.snapshot().status, QueryStatus::Loading);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.poll());
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.status, QueryStatus::Success);
    assert_eq!(snapshot.data.as_deref(), Some(&7));
  }
}
