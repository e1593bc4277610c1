use crate::core::cache::ResponseCache;
use crate::core::error::FetchError;
use crate::core::source::TransactionSource;
use crate::core::transaction::TransactionSet;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

type SharedFetch = Shared<BoxFuture<'static, Result<TransactionSet, FetchError>>>;

/// Memoizes the transaction set of an inner source for a fixed duration.
///
/// The cached value is the in-flight fetch itself, so every caller inside the
/// same window awaits one request and receives the same result. A fetch that
/// failed is dropped on the next call rather than replayed.
pub struct CachingTransactionSource<T: TransactionSource> {
    inner: Arc<T>,
    cache: Mutex<ResponseCache<SharedFetch>>,
}

impl<T: TransactionSource + 'static> CachingTransactionSource<T> {
    pub fn new(inner: T, ttl: Duration, replay_depth: usize) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: Mutex::new(ResponseCache::new(ttl, replay_depth)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ResponseCache<SharedFetch>> {
        // Never held across an await
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn start_fetch(&self) -> SharedFetch {
        let inner = Arc::clone(&self.inner);
        async move { inner.fetch_all().await }.boxed().shared()
    }

    fn current_fetch(&self) -> SharedFetch {
        let now = Instant::now();
        let mut cache = self.lock();

        if cache
            .generations()
            .next()
            .is_some_and(|fetch| matches!(fetch.peek(), Some(Err(_))))
        {
            debug!("Discarding failed cache generation");
            cache.discard_current();
        }

        let (fetch, started) = cache.get_or_insert_with(now, || self.start_fetch());
        if started {
            debug!("Started new cache generation");
        }
        fetch
    }

    /// Successfully fetched transaction sets still retained, newest first.
    pub fn replay(&self) -> Vec<TransactionSet> {
        self.lock()
            .generations()
            .filter_map(|fetch| match fetch.peek() {
                Some(Ok(transactions)) => Some(Arc::clone(transactions)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl<T: TransactionSource + 'static> TransactionSource for CachingTransactionSource<T> {
    async fn fetch_all(&self) -> Result<TransactionSet, FetchError> {
        let fetch = self.current_fetch();
        fetch.await
    }
}
