//! 时间工具函数 — 业务时区转换
//!
//! 台北固定时区 (UTC+8)，无夏令时。账本按业务时区的日期分页，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, FixedOffset, Utc};

/// Business timezone offset: UTC+8 (Asia/Taipei, no DST)
const BUSINESS_TZ_SECONDS: i32 = 8 * 3600;

fn business_offset() -> FixedOffset {
    // 8 * 3600 is always in range
    FixedOffset::east_opt(BUSINESS_TZ_SECONDS).expect("valid fixed offset")
}

fn to_business_time(millis: i64) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_else(Utc::now)
        .with_timezone(&business_offset())
}

/// Per-day ledger sheet title (`YYYY-MM-DD`) for the given timestamp
pub fn ledger_sheet_title(millis: i64) -> String {
    to_business_time(millis).format("%Y-%m-%d").to_string()
}

/// Localized timestamp written into ledger rows
pub fn format_business_time(millis: i64) -> String {
    to_business_time(millis).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_title_uses_business_timezone() {
        // 2024-03-10 23:00 UTC is already 2024-03-11 in UTC+8
        let millis = 1_710_111_600_000;
        assert_eq!(ledger_sheet_title(millis), "2024-03-11");
    }

    #[test]
    fn formatted_time_includes_clock() {
        let millis = 1_710_111_600_000;
        assert_eq!(format_business_time(millis), "2024-03-11 07:00:00");
    }
}
