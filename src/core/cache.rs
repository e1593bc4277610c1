use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

/// Single-slot cache with a time-to-live and a short history of previous
/// generations.
///
/// A generation starts when a value is inserted and stays fresh for `ttl`.
/// Up to `replay_depth` generations are retained, the current one included,
/// so late observers can still see recent values after a refresh.
///
/// All methods take the current time explicitly; the cache never reads the
/// clock itself.
#[derive(Debug)]
pub struct ResponseCache<V> {
    ttl: Duration,
    replay_depth: usize,
    last_fetch_time: Option<Instant>,
    cached_value: Option<V>,
    history: VecDeque<V>,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration, replay_depth: usize) -> Self {
        let replay_depth = replay_depth.max(1);
        Self {
            ttl,
            replay_depth,
            last_fetch_time: None,
            cached_value: None,
            history: VecDeque::with_capacity(replay_depth - 1),
        }
    }

    pub fn replay_depth(&self) -> usize {
        self.replay_depth
    }

    /// True when there is no current generation or it is older than `ttl`.
    pub fn is_expired(&self, now: Instant) -> bool {
        match (self.last_fetch_time, &self.cached_value) {
            (Some(created), Some(_)) => now.saturating_duration_since(created) > self.ttl,
            _ => true,
        }
    }

    /// The current value, if it is still fresh.
    pub fn get(&self, now: Instant) -> Option<V> {
        if self.is_expired(now) {
            debug!("Cache MISS");
            return None;
        }
        debug!("Cache HIT");
        self.cached_value.clone()
    }

    /// Starts a new generation holding `value`. The previous generation, if
    /// any, moves into the replay history.
    pub fn insert(&mut self, now: Instant, value: V) {
        if let Some(previous) = self.cached_value.take() {
            self.history.push_front(previous);
            self.history.truncate(self.replay_depth - 1);
        }
        debug!("Cache PUT");
        self.last_fetch_time = Some(now);
        self.cached_value = Some(value);
    }

    /// Returns the fresh value, or inserts the one produced by `make`.
    ///
    /// The boolean is true when `make` ran.
    pub fn get_or_insert_with(&mut self, now: Instant, make: impl FnOnce() -> V) -> (V, bool) {
        if let Some(value) = self.get(now) {
            return (value, false);
        }
        let value = make();
        self.insert(now, value.clone());
        (value, true)
    }

    /// Forgets the current generation without keeping it in the history.
    pub fn discard_current(&mut self) {
        if self.cached_value.take().is_some() {
            debug!("Cache DISCARD");
        }
        self.last_fetch_time = None;
    }

    /// Retained generations, newest first.
    pub fn generations(&self) -> impl Iterator<Item = &V> {
        self.cached_value.iter().chain(self.history.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_get_put() {
        let now = Instant::now();
        let mut cache = ResponseCache::<i32>::new(Duration::from_secs(60), 1);

        // Initially, cache is empty
        assert!(cache.is_expired(now));
        assert!(cache.get(now).is_none());

        cache.insert(now, 123);
        assert_eq!(cache.get(now), Some(123));
        assert_eq!(cache.get(now + Duration::from_secs(30)), Some(123));
    }

    #[test]
    fn test_cache_expires_after_ttl() {
        let now = Instant::now();
        let ttl = Duration::from_millis(500);
        let mut cache = ResponseCache::<i32>::new(ttl, 1);
        cache.insert(now, 1);

        // Exactly at the boundary is still fresh
        assert!(!cache.is_expired(now + ttl));
        assert_eq!(cache.get(now + ttl), Some(1));

        let later = now + ttl + Duration::from_millis(1);
        assert!(cache.is_expired(later));
        assert!(cache.get(later).is_none());
    }

    #[test]
    fn test_get_or_insert_with() {
        let now = Instant::now();
        let ttl = Duration::from_secs(10);
        let mut cache = ResponseCache::<&str>::new(ttl, 1);

        assert_eq!(cache.get_or_insert_with(now, || "first"), ("first", true));
        assert_eq!(
            cache.get_or_insert_with(now + Duration::from_secs(5), || "second"),
            ("first", false)
        );

        let later = now + ttl + Duration::from_secs(1);
        assert_eq!(cache.get_or_insert_with(later, || "third"), ("third", true));
        // Freshness counts from the new generation's creation
        assert_eq!(
            cache.get_or_insert_with(later + ttl, || "fourth"),
            ("third", false)
        );
    }

    #[test]
    fn test_replay_depth_bounds_history() {
        let now = Instant::now();
        let mut cache = ResponseCache::<i32>::new(Duration::ZERO, 3);

        for (i, value) in (1..=5).enumerate() {
            cache.insert(now + Duration::from_secs(i as u64), value);
        }

        let retained: Vec<_> = cache.generations().copied().collect();
        assert_eq!(retained, vec![5, 4, 3]);
    }

    #[test]
    fn test_zero_replay_depth_keeps_current() {
        let now = Instant::now();
        let mut cache = ResponseCache::<i32>::new(Duration::from_secs(1), 0);
        assert_eq!(cache.replay_depth(), 1);

        cache.insert(now, 1);
        cache.insert(now, 2);
        assert_eq!(cache.generations().copied().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_discard_current() {
        let now = Instant::now();
        let mut cache = ResponseCache::<i32>::new(Duration::from_secs(60), 2);
        cache.insert(now, 1);
        cache.insert(now, 2);

        cache.discard_current();
        assert!(cache.is_expired(now));
        assert!(cache.get(now).is_none());
        assert_eq!(cache.generations().copied().collect::<Vec<_>>(), vec![1]);

        // The next insert does not push an empty slot into the history
        cache.insert(now, 3);
        assert_eq!(cache.generations().copied().collect::<Vec<_>>(), vec![3, 1]);
    }
}
