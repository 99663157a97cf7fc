use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use shared_types::{parse_timestamp, SavedWord};

/// Calendar date of `at` in the viewer's zone
fn local_date<Tz: TimeZone>(at: DateTime<Utc>, zone: &Tz) -> NaiveDate {
    at.with_timezone(zone).date_naive()
}

/// "Today", "Yesterday", or an abbreviated month and day such as "Mar 5".
/// Empty or malformed input renders as an empty string.
pub fn format_date<Tz: TimeZone>(raw: &str, now: &DateTime<Tz>) -> String {
    let Some(at) = parse_timestamp(raw) else {
        return String::new();
    };

    let zone = now.timezone();
    let day = local_date(at, &zone);
    let today = now.date_naive();

    if day == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(day) {
        "Yesterday".to_string()
    } else {
        day.format("%b %-d").to_string()
    }
}

/// Words created on `now`'s calendar date. Malformed timestamps never count.
pub fn count_today<Tz: TimeZone>(words: &[SavedWord], now: &DateTime<Tz>) -> usize {
    let zone = now.timezone();
    let today = now.date_naive();
    words
        .iter()
        .filter_map(SavedWord::created_at_utc)
        .filter(|at| local_date(*at, &zone) == today)
        .count()
}

pub fn list_label(total: usize) -> String {
    match total {
        0 => String::new(),
        1 => "1 word".to_string(),
        n => format!("{n} words"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset};

    use super::*;

    fn word(id: &str, created_at: &str) -> SavedWord {
        SavedWord {
            id: id.to_string(),
            word: id.to_string(),
            meaning: None,
            created_at: created_at.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 15, 30, 0).unwrap()
    }

    #[test]
    fn now_is_today() {
        let now = now();
        assert_eq!(format_date(&now.to_rfc3339(), &now), "Today");
    }

    #[test]
    fn previous_calendar_day_is_yesterday() {
        let now = now();
        let earlier = now - Duration::days(1);
        assert_eq!(format_date(&earlier.to_rfc3339(), &now), "Yesterday");

        // Only minutes apart, but across midnight.
        let just_after_midnight = Utc.with_ymd_and_hms(2024, 3, 6, 0, 5, 0).unwrap();
        assert_eq!(
            format_date("2024-03-05T23:55:00Z", &just_after_midnight),
            "Yesterday"
        );
    }

    #[test]
    fn older_dates_use_month_and_day() {
        let now = now();
        assert_eq!(format_date("2024-02-27T09:00:00Z", &now), "Feb 27");
        assert_eq!(format_date("2023-12-05 08:00:00", &now), "Dec 5");
    }

    #[test]
    fn dates_follow_viewer_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tokyo.with_ymd_and_hms(2024, 3, 6, 8, 0, 0).unwrap();
        // 2024-03-05 20:00 UTC is already March 6th in Tokyo.
        assert_eq!(format_date("2024-03-05T20:00:00Z", &now), "Today");
    }

    #[test]
    fn malformed_dates_render_empty() {
        let now = now();
        assert_eq!(format_date("", &now), "");
        assert_eq!(format_date("yesterday-ish", &now), "");
    }

    #[test]
    fn today_count_skips_other_days_and_garbage() {
        let now = now();
        let words = vec![
            word("a", "2024-03-05T01:00:00Z"),
            word("b", "2024-03-05 14:00:00"),
            word("c", "2024-03-04T23:59:59Z"),
            word("d", "garbage"),
            word("e", ""),
        ];
        assert_eq!(count_today(&words, &now), 2);
    }

    #[test]
    fn label_pluralises() {
        assert_eq!(list_label(0), "");
        assert_eq!(list_label(1), "1 word");
        assert_eq!(list_label(12), "12 words");
    }
}
