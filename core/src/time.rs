//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into EdgeGrid timestamp: `20220313T07:20:04+0000`
///
/// The date part is ISO 8601 basic format (no `-`), the time part keeps its
/// `:` separators and the offset is always UTC.
pub fn format_edgegrid_timestamp(t: DateTime) -> String {
    t.format("%Y%m%dT%H:%M:%S+0000").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_format_edgegrid_timestamp() {
        assert_eq!(
            format_edgegrid_timestamp(test_time()),
            "20240115T10:30:00+0000"
        );
    }

    #[test]
    fn test_format_pads_single_digits() {
        let t = Utc.with_ymd_and_hms(2014, 3, 2, 1, 4, 5).unwrap();
        assert_eq!(format_edgegrid_timestamp(t), "20140302T01:04:05+0000");
    }
}
