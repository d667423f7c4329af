//! JST time handling for the lobby.
//!
//! Room creation and chat timestamps are stamped through the [`Clock`]
//! trait, so tests can pin time with [`FixedClock`] instead of reading
//! the system clock.

use chrono::{FixedOffset, TimeZone, Utc};

/// JST is UTC+9 with no daylight saving.
const JST_UTC_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_UTC_OFFSET_SECS).expect("JST offset is in range")
}

/// Source of "now" for stamping lobby events.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds.
    fn now_jst_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_jst_millis(&self) -> i64 {
        Utc::now().with_timezone(&jst()).timestamp_millis()
    }
}

/// Clock pinned to a single instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pinned_millis: i64,
}

impl FixedClock {
    /// Pin the clock to the given millisecond timestamp.
    pub fn new(pinned_millis: i64) -> Self {
        Self { pinned_millis }
    }
}

impl Clock for FixedClock {
    fn now_jst_millis(&self) -> i64 {
        self.pinned_millis
    }
}

/// Render a millisecond timestamp as RFC 3339 in the JST offset.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let secs = timestamp_millis.div_euclid(1000);
    let nanos = (timestamp_millis.rem_euclid(1000) * 1_000_000) as u32;
    jst()
        .timestamp_opt(secs, nanos)
        .single()
        .expect("millisecond timestamp is in range")
        .to_rfc3339()
}
