use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Time-based link identifier (Unix millis at creation)
pub type LinkId = u64;

/// One stored short link
///
/// Field names on disk are camelCase; a collection holding only `id`,
/// `link` and `expirationTime` still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub id: LinkId,
    pub link: String,
    /// Selected duration in minutes; `None` never expires
    #[serde(default)]
    pub expiration_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Build a fresh record; the absolute deadline is derived from `now`
    pub fn new(
        id: LinkId,
        link: String,
        long_url: Option<String>,
        expiration: Option<ExpirationChoice>,
        now: DateTime<Utc>,
    ) -> Self {
        let expiration_time = expiration.map(|c| c.minutes());
        Self {
            id,
            link,
            expiration_time,
            long_url,
            created_at: Some(now),
            expires_at: expiration_time.map(|m| now + Duration::minutes(i64::from(m))),
        }
    }

    pub fn expires(&self) -> bool {
        self.expiration_time.is_some()
    }

    /// Full configured duration
    pub fn expiration_duration(&self) -> Option<std::time::Duration> {
        self.expiration_time
            .map(|m| std::time::Duration::from_secs(u64::from(m) * 60))
    }

    /// Time left before removal, measured from `now`
    ///
    /// Records without an absolute deadline get the full duration again.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        let full = self.expiration_duration()?;
        match self.expires_at {
            Some(deadline) => Some((deadline - now).to_std().unwrap_or(std::time::Duration::ZERO)),
            None => Some(full),
        }
    }
}

/// Fixed expiration options offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ExpirationChoice {
    OneMinute,
    FiveMinutes,
    ThirtyMinutes,
    OneHour,
    FiveHours,
}

impl ExpirationChoice {
    pub fn minutes(self) -> u32 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::FiveHours => 300,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OneMinute => "1 minute",
            Self::FiveMinutes => "5 minutes",
            Self::ThirtyMinutes => "30 minutes",
            Self::OneHour => "1 hour",
            Self::FiveHours => "5 hours",
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        Self::iter().find(|c| c.minutes() == minutes)
    }

    /// Cycle forward through the options; `None` starts at the first one
    pub fn cycle(current: Option<Self>) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        match current {
            None => all[0],
            Some(c) => {
                let idx = all.iter().position(|x| *x == c).unwrap_or(0);
                all[(idx + 1) % all.len()]
            }
        }
    }

    /// Cycle backward; `None` starts at the last one
    pub fn cycle_back(current: Option<Self>) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        match current {
            None => all[all.len() - 1],
            Some(c) => {
                let idx = all.iter().position(|x| *x == c).unwrap_or(0);
                all[(idx + all.len() - 1) % all.len()]
            }
        }
    }
}

impl std::fmt::Display for ExpirationChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ExpirationChoice {
    type Err = String;

    /// Accepts plain minutes (`1`, `5`, `30`, `60`, `300`) or `1m`, `5m`, `30m`, `1h`, `5h`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let minutes = if let Some(h) = s.strip_suffix('h') {
            h.parse::<u32>().ok().and_then(|h| h.checked_mul(60))
        } else {
            s.strip_suffix('m').unwrap_or(&s).parse::<u32>().ok()
        };

        minutes.and_then(Self::from_minutes).ok_or_else(|| {
            format!(
                "Invalid expiration: '{}'. Valid: 1, 5, 30, 60, 300 (minutes) or 1m, 5m, 30m, 1h, 5h",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_choice_minutes() {
        let minutes: Vec<u32> = ExpirationChoice::iter().map(|c| c.minutes()).collect();
        assert_eq!(minutes, vec![1, 5, 30, 60, 300]);
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!("1".parse::<ExpirationChoice>(), Ok(ExpirationChoice::OneMinute));
        assert_eq!("30m".parse::<ExpirationChoice>(), Ok(ExpirationChoice::ThirtyMinutes));
        assert_eq!("1h".parse::<ExpirationChoice>(), Ok(ExpirationChoice::OneHour));
        assert_eq!(" 5H ".parse::<ExpirationChoice>(), Ok(ExpirationChoice::FiveHours));
        assert_eq!("300".parse::<ExpirationChoice>(), Ok(ExpirationChoice::FiveHours));
        assert!("2".parse::<ExpirationChoice>().is_err());
        assert!("".parse::<ExpirationChoice>().is_err());
        assert!("abc".parse::<ExpirationChoice>().is_err());
    }

    #[test]
    fn test_choice_cycle() {
        assert_eq!(ExpirationChoice::cycle(None), ExpirationChoice::OneMinute);
        assert_eq!(
            ExpirationChoice::cycle(Some(ExpirationChoice::FiveHours)),
            ExpirationChoice::OneMinute
        );
        assert_eq!(
            ExpirationChoice::cycle_back(Some(ExpirationChoice::OneMinute)),
            ExpirationChoice::FiveHours
        );
        assert_eq!(ExpirationChoice::cycle_back(None), ExpirationChoice::FiveHours);
    }

    #[test]
    fn test_new_record_sets_deadline() {
        let record = LinkRecord::new(
            1,
            "https://bit.ly/abc".to_string(),
            Some("https://example.com".to_string()),
            Some(ExpirationChoice::FiveMinutes),
            at(1_000),
        );
        assert_eq!(record.expiration_time, Some(5));
        assert_eq!(record.expires_at, Some(at(1_300)));
        assert_eq!(
            record.expiration_duration(),
            Some(std::time::Duration::from_secs(300))
        );
    }

    #[test]
    fn test_remaining_honours_deadline() {
        let record = LinkRecord::new(
            1,
            "https://bit.ly/abc".to_string(),
            None,
            Some(ExpirationChoice::OneMinute),
            at(1_000),
        );
        assert_eq!(record.remaining(at(1_020)), Some(std::time::Duration::from_secs(40)));
        assert_eq!(record.remaining(at(2_000)), Some(std::time::Duration::ZERO));
    }

    #[test]
    fn test_remaining_without_deadline_restarts() {
        let record = LinkRecord {
            id: 7,
            link: "https://bit.ly/legacy".to_string(),
            expiration_time: Some(5),
            long_url: None,
            created_at: None,
            expires_at: None,
        };
        assert_eq!(record.remaining(at(9_999)), Some(std::time::Duration::from_secs(300)));
    }

    #[test]
    fn test_never_expires() {
        let record = LinkRecord::new(1, "https://bit.ly/x".to_string(), None, None, at(0));
        assert!(!record.expires());
        assert_eq!(record.remaining(at(10)), None);
        assert_eq!(record.expires_at, None);
    }

    #[test]
    fn test_legacy_json_loads() {
        let json = r#"[{"id":1700000000000,"link":"https://bit.ly/3xyz","expirationTime":1}]"#;
        let records: Vec<LinkRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1_700_000_000_000);
        assert_eq!(records[0].expiration_time, Some(1));
        assert!(records[0].expires_at.is_none());
    }

    #[test]
    fn test_camel_case_keys() {
        let record = LinkRecord::new(
            3,
            "https://bit.ly/k".to_string(),
            Some("https://example.com".to_string()),
            Some(ExpirationChoice::OneHour),
            at(0),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"expirationTime\":60"));
        assert!(json.contains("\"longUrl\""));
        assert!(json.contains("\"expiresAt\""));
    }
}
