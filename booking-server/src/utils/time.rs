//! 时间工具函数
//!
//! 预订日期/时间统一为字符串存储 (`YYYY-MM-DD` / `HH:MM`)，
//! 本模块负责格式校验与月份键提取。

use chrono::{NaiveDate, NaiveTime};

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// 解析时间字符串 (HH:MM)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// 解析月份键 (YYYY-MM)
pub fn parse_month(month: &str) -> AppResult<(i32, u32)> {
    let parsed = month
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
        .filter(|(_, m)| (1..=12).contains(m) && month.len() == 7);
    parsed.ok_or_else(|| AppError::validation(format!("Invalid month format: {}", month)))
}

/// 预订日期 → 月份键 (`2025-10-04` → `2025-10`)
///
/// 调用方保证日期已通过 [`parse_date`] 校验。
pub fn month_key(date: &str) -> &str {
    date.get(..7).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_dates_and_times() {
        assert!(parse_date("2025-10-04").is_ok());
        assert!(parse_time("19:30").is_ok());
    }

    #[test]
    fn rejects_malformed_dates_and_times() {
        assert!(parse_date("04.10.2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_time("7pm").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn month_key_is_date_prefix() {
        assert_eq!(month_key("2025-10-04"), "2025-10");
    }

    #[test]
    fn month_format_is_strict() {
        assert!(parse_month("2025-10").is_ok());
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-1").is_err());
        assert!(parse_month("202510").is_err());
    }
}
