//! Pageview date window and chart-ready points.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::normalize::DailyViews;

/// Days before "today" at which the window starts.
pub const WINDOW_START_DAYS_AGO: u64 = 31;
/// Days before "today" at which the window ends; the most recent days are
/// usually not yet published.
pub const WINDOW_END_DAYS_AGO: u64 = 2;

const DATE_CODE_FORMAT: &str = "%Y%m%d";

/// Inclusive date range requested from the pageviews service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageviewWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PageviewWindow {
    /// The trailing window `[today - 31d, today - 2d]`.
    #[must_use]
    pub fn ending_before(today: NaiveDate) -> Self {
        let days_ago = |n| today.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);
        Self {
            start: days_ago(WINDOW_START_DAYS_AGO),
            end: days_ago(WINDOW_END_DAYS_AGO),
        }
    }

    #[must_use]
    pub fn start_code(&self) -> String {
        self.start.format(DATE_CODE_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_code(&self) -> String {
        self.end.format(DATE_CODE_FORMAT).to_string()
    }
}

/// Parses an eight-digit `YYYYMMDD` code.
#[must_use]
pub fn date_from_code(code: &str) -> Option<NaiveDate> {
    if code.len() != 8 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(code, DATE_CODE_FORMAT).ok()
}

/// One point of the daily-views chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageviewPoint {
    pub date: NaiveDate,
    /// Short axis label such as `"Jan 5"`.
    pub label: String,
    pub views: u64,
}

/// Converts daily views into chart points, skipping entries whose date code
/// does not parse. Order is preserved.
#[must_use]
pub fn chart_points(days: &[DailyViews]) -> Vec<PageviewPoint> {
    days.iter()
        .filter_map(|day| {
            let date = date_from_code(&day.date_code)?;
            Some(PageviewPoint {
                date,
                label: date.format("%b %-d").to_string(),
                views: day.views,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_spans_thirty_one_to_two_days_ago() {
        let window = PageviewWindow::ending_before(date(2025, 1, 10));
        assert_eq!(window.start, date(2024, 12, 10));
        assert_eq!(window.end, date(2025, 1, 8));
        assert_eq!(window.start_code(), "20241210");
        assert_eq!(window.end_code(), "20250108");
    }

    #[test]
    fn window_is_twenty_nine_days_apart() {
        let window = PageviewWindow::ending_before(date(2024, 3, 1));
        assert_eq!((window.end - window.start).num_days(), 29);
    }

    #[test]
    fn date_from_code_accepts_eight_digits_only() {
        assert_eq!(date_from_code("20240229"), Some(date(2024, 2, 29)));
        assert_eq!(date_from_code("20230229"), None);
        assert_eq!(date_from_code("2024010"), None);
        assert_eq!(date_from_code("2024-01-01"), None);
        assert_eq!(date_from_code(""), None);
    }

    #[test]
    fn chart_points_label_dates_and_skip_bad_codes() {
        let days = vec![
            DailyViews {
                date_code: "20250105".to_string(),
                views: 12,
            },
            DailyViews {
                date_code: "garbage".to_string(),
                views: 99,
            },
            DailyViews {
                date_code: "20250106".to_string(),
                views: 0,
            },
        ];
        let points = chart_points(&days);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Jan 5");
        assert_eq!(points[0].views, 12);
        assert_eq!(points[1].date, date(2025, 1, 6));
    }
}
