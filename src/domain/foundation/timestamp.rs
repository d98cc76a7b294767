//! UTC timestamp value object.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC. Serialized as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Shifts by a signed number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// Shifts by a signed duration.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn ordering_follows_time() {
        let earlier = fixed("2025-03-01T09:00:00Z");
        let later = fixed("2025-03-01T10:00:00Z");
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(earlier < later);
    }

    #[test]
    fn plus_hours_shifts_both_ways() {
        let ts = fixed("2025-03-01T09:00:00Z");
        assert_eq!(ts.plus_hours(2), fixed("2025-03-01T11:00:00Z"));
        assert_eq!(ts.plus_hours(-9), fixed("2025-03-01T00:00:00Z"));
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let json = serde_json::to_string(&fixed("2025-03-01T09:00:00Z")).unwrap();
        assert!(json.starts_with("\"2025-03-01T09:00:00"));
    }

    #[test]
    fn deserializes_offset_times_into_utc() {
        let ts: Timestamp = serde_json::from_str("\"2025-03-01T16:00:00+07:00\"").unwrap();
        assert_eq!(ts, fixed("2025-03-01T09:00:00Z"));
    }
}
