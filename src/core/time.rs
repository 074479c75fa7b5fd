//! Timestamp generation for records and audit entries.
//!
//! All timestamps use a fixed UTC+05:30 offset (IST) with no daylight-saving
//! rules and no timezone database lookup. This is a deliberate simplification
//! carried over unchanged so the audit trail stays comparable across runs.

use chrono::{FixedOffset, SecondsFormat, Utc};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within range")
}

/// Current time as an RFC 3339 string with microseconds, e.g.
/// `2024-01-01T10:00:00.123456+05:30`.
pub fn now_ist() -> String {
    Utc::now()
        .with_timezone(&ist())
        .to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_carry_fixed_ist_offset() {
        let ts = now_ist();
        assert!(ts.ends_with("+05:30"), "unexpected timestamp: {ts}");
    }
}
