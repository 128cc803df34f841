//! Cookie-style expiring wrapper over another key-value backing.
//!
//! Each stored value is framed as an 8-byte big-endian expiry timestamp
//! (unix epoch milliseconds) followed by the caller's payload. Entries past
//! their expiry read as absent and are evicted on access.

use super::{KeyValueStore, StorageError, StorageResult};
use log::{debug, warn};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const EXPIRY_HEADER_LEN: usize = 8;
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Time source for expiry decisions.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
            })
    }
}

/// How long written values stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub max_age: Duration,
}

impl Default for ExpiryPolicy {
    /// Thirty days, matching the usual cookie lifetime for saved tasks.
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl ExpiryPolicy {
    /// Policy lasting `days` whole days; saturates instead of overflowing.
    pub fn days(days: u64) -> Self {
        Self {
            max_age: Duration::from_secs(days.saturating_mul(24 * 60 * 60)),
        }
    }

    fn expires_at(&self, now_ms: i64) -> i64 {
        let max_age_ms = i64::try_from(self.max_age.as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_add(max_age_ms)
    }
}

/// Key-value store whose entries expire after `policy.max_age`.
///
/// Every `set` refreshes the expiry of that key.
pub struct ExpiringKvStore<S, C = SystemClock> {
    inner: S,
    clock: C,
    policy: ExpiryPolicy,
}

impl<S: KeyValueStore> ExpiringKvStore<S, SystemClock> {
    /// Wraps `inner` using the wall clock.
    pub fn new(inner: S, policy: ExpiryPolicy) -> Self {
        Self::with_clock(inner, policy, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> ExpiringKvStore<S, C> {
    /// Wraps `inner` using `clock` for expiry decisions.
    pub fn with_clock(inner: S, policy: ExpiryPolicy, clock: C) -> Self {
        Self {
            inner,
            clock,
            policy,
        }
    }
}

impl<S: KeyValueStore, C: Clock> KeyValueStore for ExpiringKvStore<S, C> {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let Some(framed) = self.inner.get(key)? else {
            return Ok(None);
        };
        if framed.len() < EXPIRY_HEADER_LEN {
            return Err(StorageError::CorruptEntry(key.to_string()));
        }

        let (header, payload) = framed.split_at(EXPIRY_HEADER_LEN);
        let mut expiry_bytes = [0_u8; EXPIRY_HEADER_LEN];
        expiry_bytes.copy_from_slice(header);
        let expires_at = i64::from_be_bytes(expiry_bytes);

        if self.clock.now_epoch_ms() >= expires_at {
            debug!("event=kv_expired module=storage status=ok key={key} expires_at={expires_at}");
            if let Err(err) = self.inner.remove(key) {
                warn!("event=kv_evict module=storage status=error key={key} error={err}");
            }
            return Ok(None);
        }

        Ok(Some(payload.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let expires_at = self.policy.expires_at(self.clock.now_epoch_ms());
        let mut framed = Vec::with_capacity(EXPIRY_HEADER_LEN + value.len());
        framed.extend_from_slice(&expires_at.to_be_bytes());
        framed.extend_from_slice(value);
        self.inner.set(key, &framed)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}
