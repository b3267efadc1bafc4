use chrono::{Days, NaiveDate, NaiveTime};

use crate::model::item::TodoItem;

/// Parse a due-date entry: `YYYY-MM-DD`, `today`, `tomorrow`, or `+N` days.
pub fn parse_due_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        _ => {}
    }
    if let Some(days) = input.strip_prefix('+') {
        // Out-of-range offsets yield None rather than a date
        let days: u64 = days.parse().ok()?;
        return today.checked_add_days(Days::new(days));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Validate a time-of-day entry and normalise it to zero-padded `HH:MM`.
pub fn parse_due_time(input: &str) -> Option<String> {
    let time = NaiveTime::parse_from_str(input.trim(), "%H:%M").ok()?;
    Some(time.format("%H:%M").to_string())
}

/// Short schedule label, e.g. `May 1 at 09:30`. `None` when no date is set;
/// a time without a date is not shown.
pub fn due_label(item: &TodoItem) -> Option<String> {
    let date = item.due_date?;
    let mut label = date.format("%b %-d").to_string();
    if let Some(time) = item.due_time.as_deref().filter(|t| !t.is_empty()) {
        label.push_str(" at ");
        label.push_str(time);
    }
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_date_forms() {
        let today = day(2025, 2, 27);
        assert_eq!(parse_due_date("today", today), Some(today));
        assert_eq!(parse_due_date("Tomorrow", today), Some(day(2025, 2, 28)));
        assert_eq!(parse_due_date("+3", today), Some(day(2025, 3, 2)));
        assert_eq!(parse_due_date(" 2025-12-31 ", today), Some(day(2025, 12, 31)));
        assert_eq!(parse_due_date("next week", today), None);
        assert_eq!(parse_due_date("+x", today), None);
        assert_eq!(parse_due_date("2025-02-30", today), None);
        assert_eq!(parse_due_date("+0", today), Some(today));
        assert_eq!(parse_due_date("+-3", today), None);
    }

    #[test]
    fn huge_offsets_are_rejected() {
        let today = day(2025, 2, 27);
        assert_eq!(parse_due_date("+999999999999999", today), None);
        assert_eq!(parse_due_date("+99999999999999999999999", today), None);
        assert_eq!(parse_due_date("+4294967296", today), None);
        assert_eq!(parse_due_date("tomorrow", NaiveDate::MAX), None);
    }

    #[test]
    fn parses_and_pads_times() {
        assert_eq!(parse_due_time("9:05"), Some("09:05".to_string()));
        assert_eq!(parse_due_time("23:59"), Some("23:59".to_string()));
        assert_eq!(parse_due_time("24:00"), None);
        assert_eq!(parse_due_time("noon"), None);
    }

    #[test]
    fn label_combines_date_and_time() {
        let mut item = TodoItem::blank("a".into(), 0);
        assert_eq!(due_label(&item), None);
        item.due_time = Some("10:00".into());
        assert_eq!(due_label(&item), None);
        item.due_date = Some(day(2025, 5, 1));
        assert_eq!(due_label(&item).as_deref(), Some("May 1 at 10:00"));
        item.due_time = None;
        assert_eq!(due_label(&item).as_deref(), Some("May 1"));
    }
}
