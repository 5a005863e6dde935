pub mod trade;

pub use trade::Trade;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

/// Which side of a binary market a trade took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Yes,
    No,
}

impl Side {
    pub fn from_api_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yes" => Some(Side::Yes),
            "no" => Some(Side::No),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Yes => write!(f, "yes"),
            Side::No => write!(f, "no"),
        }
    }
}

// ---------------------------------------------------------------------------
// AgeCategory
// ---------------------------------------------------------------------------

/// Display bucket for a trade's age. Purely cosmetic: recomputed on every
/// read, never drives copy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    Recent,
    Hour,
    Halfday,
    Old,
}

impl AgeCategory {
    /// Bucket boundaries are inclusive in whole seconds: a trade exactly
    /// five minutes old is still `Recent`.
    pub fn classify(created_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age = now.signed_duration_since(created_time);
        if age <= Duration::minutes(5) {
            AgeCategory::Recent
        } else if age <= Duration::minutes(60) {
            AgeCategory::Hour
        } else if age <= Duration::minutes(720) {
            AgeCategory::Halfday
        } else {
            AgeCategory::Old
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_secs_ago(secs: i64) -> AgeCategory {
        let now = Utc::now();
        AgeCategory::classify(now - Duration::seconds(secs), now)
    }

    #[test]
    fn test_age_boundaries() {
        assert_eq!(classify_secs_ago(0), AgeCategory::Recent);
        assert_eq!(classify_secs_ago(300), AgeCategory::Recent);
        assert_eq!(classify_secs_ago(301), AgeCategory::Hour);
        assert_eq!(classify_secs_ago(3600), AgeCategory::Hour);
        assert_eq!(classify_secs_ago(3601), AgeCategory::Halfday);
        assert_eq!(classify_secs_ago(43_200), AgeCategory::Halfday);
        assert_eq!(classify_secs_ago(43_201), AgeCategory::Old);
    }

    #[test]
    fn test_side_from_api_str() {
        assert_eq!(Side::from_api_str("yes"), Some(Side::Yes));
        assert_eq!(Side::from_api_str("NO"), Some(Side::No));
        assert_eq!(Side::from_api_str("maybe"), None);
    }
}
