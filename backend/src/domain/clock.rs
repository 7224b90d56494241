//! Logical timestamps for ledger rows.
//!
//! The pure core never reads the system clock itself; callers capture a
//! timestamp once per operation and pass it in, so an operation that emits
//! several ledger rows stamps them all identically.

use chrono::{Datelike, Local};

/// Date and time of a ledger event, pre-formatted the way clients render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTimestamp {
    /// Korean long-form calendar date, e.g. "2026년 8월 26일"
    pub day: String,
    /// 24-hour clock, e.g. "14:30"
    pub time: String,
}

impl LedgerTimestamp {
    /// Capture the current local time.
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            day: format!("{}년 {}월 {}일", now.year(), now.month(), now.day()),
            time: now.format("%H:%M").to_string(),
        }
    }

    /// Fixed timestamp for deterministic tests.
    pub fn fixed(day: &str, time: &str) -> Self {
        Self {
            day: day.to_string(),
            time: time.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_formats_day_and_time() {
        let at = LedgerTimestamp::now();
        assert!(at.day.ends_with('일'));
        assert!(at.day.contains('년'));
        assert_eq!(at.time.len(), 5);
        assert_eq!(&at.time[2..3], ":");
    }
}
