use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};

/// Shown for a missing or empty timestamp.
pub const NOT_AVAILABLE: &str = "n/a";

const DATE_PATTERN: &str = "%b %-d, %Y";
const DATE_TIME_PATTERN: &str = "%b %-d, %Y, %I:%M %p";
/// For locales without an AM/PM marker.
const DATE_TIME_PATTERN_24H: &str = "%b %-d, %Y, %H:%M";

const NAIVE_DATE_TIME_PATTERNS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Locale-aware rendering of the timestamps found in the payload.
///
/// Malformed input is returned unchanged so bad upstream data stays visible.
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    locale: Locale,
    date_time_pattern: &'static str,
}

impl DateFormatter {
    pub fn new(locale: Locale) -> Self {
        let date_time_pattern = if has_meridiem(locale) {
            DATE_TIME_PATTERN
        } else {
            DATE_TIME_PATTERN_24H
        };
        Self {
            locale,
            date_time_pattern,
        }
    }

    /// Looks up a POSIX locale name such as `en_US` or `de_DE`.
    pub fn for_locale_name(name: &str) -> Option<Self> {
        Locale::try_from(name).ok().map(Self::new)
    }

    /// Day precision, e.g. `Jan 5, 2025`.
    pub fn format_date(&self, value: Option<&str>) -> String {
        self.render(value, DATE_PATTERN)
    }

    /// Minute precision, e.g. `Jan 5, 2025, 03:04 PM`, or `15:04` where the
    /// locale has no AM/PM marker.
    pub fn format_date_time(&self, value: Option<&str>) -> String {
        self.render(value, self.date_time_pattern)
    }

    fn render(&self, value: Option<&str>, pattern: &str) -> String {
        let Some(raw) = value.filter(|v| !v.is_empty()) else {
            return NOT_AVAILABLE.to_string();
        };

        match parse_timestamp(raw) {
            Some(timestamp) => timestamp.format_localized(pattern, self.locale).to_string(),
            None => raw.to_string(),
        }
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Locale::en_US)
    }
}

fn has_meridiem(locale: Locale) -> bool {
    let afternoon = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| date.and_hms_opt(15, 0, 0))
        .map(|time| time.and_utc());
    afternoon.is_some_and(|time| {
        !time
            .format_localized("%p", locale)
            .to_string()
            .trim()
            .is_empty()
    })
}

/// Accepts RFC 3339, naive ISO date-times (read as UTC) and plain dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Some(timestamp) = NAIVE_DATE_TIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
    {
        return Some(timestamp.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_empty_is_sentinel() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format_date(None), "n/a");
        assert_eq!(formatter.format_date(Some("")), "n/a");
        assert_eq!(formatter.format_date_time(None), "n/a");
    }

    #[test]
    fn test_unparseable_input_is_returned_verbatim() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format_date(Some("not-a-date")), "not-a-date");
        assert_eq!(formatter.format_date_time(Some("2025-13-45")), "2025-13-45");
    }

    #[test]
    fn test_plain_date_omits_time() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format_date(Some("2025-01-05")), "Jan 5, 2025");
    }

    #[test]
    fn test_date_time_includes_hour_and_minute() {
        let formatter = DateFormatter::default();
        assert_eq!(
            formatter.format_date_time(Some("2025-01-05T15:04:00+00:00")),
            "Jan 5, 2025, 03:04 PM"
        );
    }

    #[test]
    fn test_offsets_are_rendered_in_utc() {
        let formatter = DateFormatter::default();
        assert_eq!(
            formatter.format_date_time(Some("2025-01-05T23:30:00-02:00")),
            "Jan 6, 2025, 01:30 AM"
        );
    }

    #[test]
    fn test_naive_date_time_variants_parse() {
        assert!(parse_timestamp("2025-01-05T08:15:30").is_some());
        assert!(parse_timestamp("2025-01-05T08:15:30.250").is_some());
        assert!(parse_timestamp("2025-01-05 08:15").is_some());
        assert!(parse_timestamp("Jan 5").is_none());
    }

    #[test]
    fn test_locale_changes_month_names() {
        let formatter = DateFormatter::for_locale_name("de_DE").unwrap();
        assert!(formatter.format_date(Some("2025-10-03")).contains("Okt"));
    }

    #[test]
    fn test_locale_without_meridiem_uses_24_hour_clock() {
        let formatter = DateFormatter::for_locale_name("de_DE").unwrap();
        let afternoon = formatter.format_date_time(Some("2025-10-03T15:04:00+00:00"));
        let morning = formatter.format_date_time(Some("2025-10-03T03:04:00+00:00"));

        assert!(afternoon.ends_with(", 15:04"), "{afternoon}");
        assert!(morning.ends_with(", 03:04"), "{morning}");
        assert_ne!(afternoon, morning);
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        assert!(DateFormatter::for_locale_name("xx_NOPE").is_none());
    }
}
