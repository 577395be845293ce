use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp format used for `Record::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed counting session: the tap count at reset time plus a
/// locale-formatted timestamp. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub count: u32,
    pub date: String,
}

impl Record {
    /// Build a record for `count` stamped with the current local time.
    pub fn now(count: u32) -> Self {
        Record {
            count,
            date: Local::now().format(DATE_FORMAT).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        // The persisted shape must stay compatible with the original
        // {"count": n, "date": "..."} array elements.
        let record = Record {
            count: 5,
            date: "2026-08-23 14:03:11".to_string(),
        };
        let raw = serde_json::to_string(&record).unwrap();
        assert_eq!(raw, r#"{"count":5,"date":"2026-08-23 14:03:11"}"#);

        let parsed: Record = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_now_stamps_current_time() {
        let record = Record::now(3);
        assert_eq!(record.count, 3);
        // "%Y-%m-%d %H:%M:%S" is 19 chars with a space separator.
        assert_eq!(record.date.len(), 19);
        assert_eq!(record.date.as_bytes()[10], b' ');
    }
}
