//! Time-related utilities with clock abstraction for testability.

use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, FixedOffset, Utc};

/// Display timezone offset (JST, UTC+9) in seconds.
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        current_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Manually driven clock for testing time windows.
///
/// Starts at the given timestamp and only moves when `advance_millis` or
/// `set_millis` is called, so expiry behaviour can be tested without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a new manual clock starting at the given timestamp
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    /// Move the clock forward by `delta_millis`
    pub fn advance_millis(&self, delta_millis: i64) {
        self.now.fetch_add(delta_millis, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute timestamp (may move backwards)
    pub fn set_millis(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Clock that never hands out the same reading twice.
///
/// Wraps another clock and returns `max(inner, previous + 1)`, so readings are
/// strictly increasing within one millisecond and across a backwards step of
/// the wrapped clock. Anything ordered by these readings (a clear watermark
/// versus later messages) keeps call order.
pub struct MonotonicClock {
    inner: Arc<dyn Clock>,
    last: AtomicI64,
}

impl MonotonicClock {
    /// Wrap `inner`
    pub fn new(inner: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            last: AtomicI64::new(i64::MIN),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> i64 {
        let now = self.inner.now_millis();
        let next = |last: i64| now.max(last.saturating_add(1));
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(next(last)))
            .unwrap_or_else(|last| last);
        next(previous)
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_jst(timestamp_millis: i64) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(JST_OFFSET_SECS)?;
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis).map(|dt| dt.with_timezone(&offset))
}

/// Convert Unix timestamp (milliseconds) to JST RFC 3339 format
///
/// Returns an empty string for timestamps outside chrono's representable range.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    to_jst(timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Convert Unix timestamp (milliseconds) to a JST wall-clock `HH:MM` string
///
/// This is the display time attached to every chat message.
pub fn timestamp_to_jst_hhmm(timestamp_millis: i64) -> String {
    to_jst(timestamp_millis)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}
