use chrono::{NaiveDate, NaiveDateTime};

// 后端试算表的日期栏位没有固定格式，逐一尝试常见写法
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// 宽松解析日期或日期时间字符串；纯日期视为当日 00:00
pub fn parse_flexible(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_flexible("2025-03-01").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-01 00:00");
        assert!(parse_flexible("2025/03/01").is_some());
    }

    #[test]
    fn test_parse_datetime_variants() {
        assert!(parse_flexible("2025-03-01 17:00").is_some());
        assert!(parse_flexible("2025-03-01 17:00:30").is_some());
        assert!(parse_flexible("2025-03-01T17:00:30").is_some());
        assert!(parse_flexible("2025-03-01T17:00:30+08:00").is_some());
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert!(parse_flexible("").is_none());
        assert!(parse_flexible("  ").is_none());
        assert!(parse_flexible("三月一日").is_none());
        assert!(parse_flexible("01/03/2025").is_none());
    }
}
