use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const MISSING: &str = "—";

/// Render an API timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339, naive ISO date-times and plain dates; anything else is
/// shown as sent.
#[must_use]
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return MISSING.to_string();
    };

    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return value.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return value.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(value) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return value.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_shapes_and_keeps_the_rest() {
        assert_eq!(format_timestamp(Some("2024-03-01T08:05:09Z")), "2024-03-01 08:05");
        assert_eq!(format_timestamp(Some("2024-03-01T08:05:09.123")), "2024-03-01 08:05");
        assert_eq!(format_timestamp(Some("2024-03-01")), "2024-03-01");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(Some("  ")), MISSING);
        assert_eq!(format_timestamp(None), MISSING);
    }
}
