use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Lenient date parsing for HR exports; `None` when no known layout matches.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn accepts_common_export_layouts() {
        assert_eq!(parse_date("2024-03-09"), date(2024, 3, 9));
        assert_eq!(parse_date("3/9/2024"), date(2024, 3, 9));
        assert_eq!(parse_date("09-03-2024"), date(2024, 3, 9));
        assert_eq!(parse_date("2024-03-09T17:30:00Z"), date(2024, 3, 9));
        assert_eq!(parse_date("2024-03-09 08:15:00"), date(2024, 3, 9));
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }
}
