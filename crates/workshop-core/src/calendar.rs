//! Calendar Helpers
//!
//! Month grid and day buckets for resources that are scheduled (jobs).

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Weekday};

/// Records with a point in time on the calendar
pub trait Scheduled {
    fn scheduled_at(&self) -> Option<NaiveDateTime>;
}

/// A displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    /// `June 2024`
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.first.year() && date.month() == self.first.month()
    }

    /// Weeks of the month, Monday first; days outside the month are `None`
    pub fn weeks(&self) -> Vec<[Option<NaiveDate>; 7]> {
        let lead = self.first.weekday().num_days_from_monday() as usize;
        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut slot = lead;
        let mut day = self.first;
        while self.contains(day) {
            week[slot] = Some(day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        if slot > 0 {
            weeks.push(week);
        }
        weeks
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Group records by scheduled day, each day ordered by time.
/// Records without a schedule are left out.
pub fn bucket_by_day<T: Scheduled>(items: &[T]) -> BTreeMap<NaiveDate, Vec<&T>> {
    bucket_by(items, T::scheduled_at)
}

/// [`bucket_by_day`] with the schedule read through `at`
pub fn bucket_by<T, F>(items: &[T], at: F) -> BTreeMap<NaiveDate, Vec<&T>>
where
    F: Fn(&T) -> Option<NaiveDateTime>,
{
    let mut days: BTreeMap<NaiveDate, Vec<&T>> = BTreeMap::new();
    for item in items {
        if let Some(when) = at(item) {
            days.entry(when.date()).or_default().push(item);
        }
    }
    for bucket in days.values_mut() {
        bucket.sort_by_key(|item| at(item));
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slot(Option<NaiveDateTime>);

    impl Scheduled for Slot {
        fn scheduled_at(&self) -> Option<NaiveDateTime> {
            self.0
        }
    }

    fn at(d: u32, h: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 6, d).and_then(|date| date.and_hms_opt(h, 0, 0))
    }

    #[test]
    fn test_june_2024_grid() {
        // June 1st 2024 is a Saturday
        let month = MonthCursor::new(2024, 6).unwrap();
        let weeks = month.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][4], None);
        assert_eq!(weeks[0][5], NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(weeks[4][0], NaiveDate::from_ymd_opt(2024, 6, 24));
        assert_eq!(weeks[4][6], NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(month.title(), "June 2024");
    }

    #[test]
    fn test_month_navigation() {
        let dec = MonthCursor::new(2023, 12).unwrap();
        assert_eq!(dec.next(), MonthCursor::new(2024, 1).unwrap());
        assert_eq!(dec.previous(), MonthCursor::new(2023, 11).unwrap());
        let mid = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        assert_eq!(MonthCursor::containing(mid), MonthCursor::new(2024, 2).unwrap());
    }

    #[test]
    fn test_bucket_orders_by_time() {
        let items = vec![Slot(at(3, 15)), Slot(None), Slot(at(3, 9)), Slot(at(4, 8))];
        let days = bucket_by_day(&items);
        assert_eq!(days.len(), 2);
        let third = &days[&NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()];
        assert_eq!(third[0].0, at(3, 9));
        assert_eq!(third[1].0, at(3, 15));
    }
}
