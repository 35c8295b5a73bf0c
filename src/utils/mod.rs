use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::storage::LinkRecord;

/// 剩余时间的紧凑显示：`4m 59s`、`1h 02m`、`12s`
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Remaining-time column for a record: `never`, `expired`, or the time left
pub fn describe_expiry(record: &LinkRecord, now: DateTime<Utc>) -> String {
    match record.remaining(now) {
        None => "never".to_string(),
        Some(left) if left.is_zero() => "expired".to_string(),
        Some(left) => format_remaining(left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ExpirationChoice;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(12)), "12s");
        assert_eq!(format_remaining(Duration::from_secs(299)), "4m 59s");
        assert_eq!(format_remaining(Duration::from_secs(3720)), "1h 02m");
        assert_eq!(format_remaining(Duration::ZERO), "0s");
    }

    #[test]
    fn test_describe_expiry() {
        let now = Utc::now();
        let never = LinkRecord::new(1, "https://bit.ly/a".into(), None, None, now);
        assert_eq!(describe_expiry(&never, now), "never");

        let five = LinkRecord::new(
            2,
            "https://bit.ly/b".into(),
            None,
            Some(ExpirationChoice::FiveMinutes),
            now,
        );
        assert_eq!(describe_expiry(&five, now), "5m 00s");
        assert_eq!(
            describe_expiry(&five, now + chrono::Duration::minutes(6)),
            "expired"
        );
    }
}
