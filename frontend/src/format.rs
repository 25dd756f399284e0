//! 展示格式化工具
//!
//! 金额与日期的列表展示格式，以及日期输入框的双向转换。
//! 全部是纯函数，服务端数据进、展示字符串出。

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 千分位分组
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

/// 金额展示，如 `€1,234.50`
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!("{sign}€{}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// 日期展示，如 `Jan 15, 2024`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %d, %Y").to_string()
}

/// 日期 + 时刻展示，如 `Jan 15, 2024 09:30`
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%b %d, %Y %H:%M").to_string()
}

/// 解析 `<input type="date">` 的值 (YYYY-MM-DD)，取 UTC 零点
pub fn parse_date_input(value: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/// 回填 `<input type="date">` 的值
pub fn date_input_value(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// 解析 `<input type="datetime-local">` 的值 (YYYY-MM-DDTHH:MM)，按 UTC 处理
pub fn parse_datetime_input(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// 回填 `<input type="datetime-local">` 的值
pub fn datetime_input_value(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

/// 首字母大写，展示词表里的小写枚举值用
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_grouping_and_rounding() {
        assert_eq!(format_money(0.0), "€0.00");
        assert_eq!(format_money(999.5), "€999.50");
        assert_eq!(format_money(1234.56), "€1,234.56");
        assert_eq!(format_money(1_000_000.0), "€1,000,000.00");
        assert_eq!(format_money(-450.0), "-€450.00");
        // 浮点尾差取整到分
        assert_eq!(format_money(0.1 + 0.2), "€0.30");
    }

    #[test]
    fn date_input_roundtrip() {
        let dt = parse_date_input("2024-06-01").unwrap();
        assert_eq!(date_input_value(&dt), "2024-06-01");
        assert_eq!(dt.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn invalid_date_input_is_rejected() {
        assert!(parse_date_input("").is_none());
        assert!(parse_date_input("01/06/2024").is_none());
        assert!(parse_date_input("2024-13-40").is_none());
    }

    #[test]
    fn datetime_input_roundtrip() {
        let dt = parse_datetime_input("2024-06-01T09:30").unwrap();
        assert_eq!(datetime_input_value(&dt), "2024-06-01T09:30");
        assert_eq!(dt.to_rfc3339(), "2024-06-01T09:30:00+00:00");
        assert!(parse_datetime_input("2024-06-01").is_none());
    }

    #[test]
    fn display_formats() {
        let dt = parse_date_input("2024-01-15").unwrap();
        assert_eq!(format_date(&dt), "Jan 15, 2024");
        assert_eq!(format_datetime(&dt), "Jan 15, 2024 00:00");
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("excavator"), "Excavator");
        assert_eq!(capitalize("in progress"), "In progress");
        assert_eq!(capitalize(""), "");
    }
}
