//! Database timestamps and their conversion to epoch milliseconds.
//!
//! Both storage backends keep creation instants as a `seconds` +
//! `nanoseconds` pair, the shape Firestore uses for its `Timestamp` type.
//! Clients never see that shape: the API surfaces every instant as epoch
//! milliseconds.
//!
//! ## Usage
//!
//! ```rust
//! use taskboard::libs::timestamp::{convert_timestamp, Timestamp};
//!
//! let ts = Timestamp::new(1_705_333_500, 250_000_000);
//! assert_eq!(ts.to_millis(), 1_705_333_500_250);
//! assert_eq!(convert_timestamp(Some(ts)), 1_705_333_500_250);
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

const NANOS_PER_MILLI: u32 = 1_000_000;

/// A point in time as stored by the document database.
///
/// `nanoseconds` is always below one second; negative instants carry a
/// negative `seconds` part and a positive fraction, like chrono does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        Self { seconds, nanoseconds }
    }

    /// The current instant.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self {
            seconds: datetime.timestamp(),
            nanoseconds: datetime.timestamp_subsec_nanos(),
        }
    }

    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1000),
            nanoseconds: millis.rem_euclid(1000) as u32 * NANOS_PER_MILLI,
        }
    }

    /// Epoch milliseconds, truncating sub-millisecond precision.
    pub fn to_millis(&self) -> i64 {
        self.seconds * 1000 + i64::from(self.nanoseconds / NANOS_PER_MILLI)
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }

    /// Parses the RFC 3339 form used by Firestore's REST `timestampValue`.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|datetime| Self::from_datetime(datetime.with_timezone(&Utc)))
    }

    pub fn to_rfc3339(&self) -> String {
        self.to_datetime()
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
    }
}

/// Converts an optional database timestamp to epoch milliseconds.
///
/// A document without a creation instant reads as created "now", so it sorts
/// as the newest task until it gets a real value.
pub fn convert_timestamp(timestamp: Option<Timestamp>) -> i64 {
    match timestamp {
        Some(timestamp) => timestamp.to_millis(),
        None => Utc::now().timestamp_millis(),
    }
}
