use chrono::{NaiveDate, NaiveDateTime, Utc};

/// Returns the current UTC time as a string formatted according to RFC 3339.
///
/// Used for the `saved_at` / `updated_at` stamps in the local cache.
/// Example: "2025-09-13T03:49:58.123456789Z"
pub fn now_as_rfc3339_string() -> String {
    Utc::now().to_rfc3339()
}

/// 解析 OCS 响应中的过期时间 (例如 "2025-01-31 00:00:00" 或 "2025-01-31")，
/// 返回 Unix 时间戳 (秒)。无法解析时返回 `None`。
pub fn parse_ocs_datetime(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_rfc3339() {
        let now_string = now_as_rfc3339_string();
        assert!(chrono::DateTime::parse_from_rfc3339(&now_string).is_ok());
    }

    #[test]
    fn test_parse_ocs_datetime_formats() {
        // 2025-01-31T00:00:00Z
        assert_eq!(parse_ocs_datetime("2025-01-31 00:00:00"), Some(1_738_281_600));
        assert_eq!(parse_ocs_datetime("2025-01-31"), Some(1_738_281_600));
        assert_eq!(parse_ocs_datetime("tomorrow"), None);
    }
}
