use chrono::{Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}

pub fn days_before(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(days as u64))
}

/// First day of an inclusive window of `days` dates ending at `today`.
pub fn trend_start(today: NaiveDate, days: u32) -> Option<NaiveDate> {
    days_before(today, days.checked_sub(1)?)
}

/// Half-open `[first-of-month, first-of-next-month)` bounds.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

/// Chart label, e.g. `Fri, Mar 15`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Table label: `Today`, `Yesterday`, or e.g. `Mar 15`.
pub fn recent_date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(date) {
        return "Yesterday".to_string();
    }
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).expect("date")
    }

    #[test]
    fn month_bounds_rolls_december_into_next_year() {
        let (start, end) = month_bounds(2024, 12).expect("bounds");
        assert_eq!(format_date(start), "2024-12-01");
        assert_eq!(format_date(end), "2025-01-01");

        let (start, end) = month_bounds(2024, 2).expect("bounds");
        assert_eq!(format_date(start), "2024-02-01");
        assert_eq!(format_date(end), "2024-03-01");
    }

    #[test]
    fn month_bounds_rejects_invalid_month() {
        assert!(month_bounds(2024, 0).is_none());
        assert!(month_bounds(2024, 13).is_none());
    }

    #[test]
    fn trend_start_covers_inclusive_window() {
        assert_eq!(trend_start(date("2024-03-15"), 7), Some(date("2024-03-09")));
        assert_eq!(trend_start(date("2024-03-15"), 1), Some(date("2024-03-15")));
        assert_eq!(trend_start(date("2024-03-15"), 0), None);
    }

    #[test]
    fn recent_date_label_names_today_and_yesterday() {
        let today = date("2024-03-15");
        assert_eq!(recent_date_label(today, today), "Today");
        assert_eq!(recent_date_label(date("2024-03-14"), today), "Yesterday");
        assert_eq!(recent_date_label(date("2024-03-02"), today), "Mar 2");
    }

    #[test]
    fn parse_date_trims_and_rejects_garbage() {
        assert_eq!(parse_date(" 2024-03-01 ").ok(), Some(date("2024-03-01")));
        assert!(parse_date("03/01/2024").is_err());
    }
}
