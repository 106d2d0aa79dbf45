use chrono::{Datelike, NaiveDate};

/// The year-aligned date range every piece of chart geometry is scaled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalDomain {
    /// Jan 1 of the earliest year.
    pub start: NaiveDate,
    /// Dec 31 of the latest year.
    pub end: NaiveDate,
}

impl TemporalDomain {
    /// Build the domain spanning whole years from `first_year` to `last_year`.
    pub fn from_years(first_year: i32, last_year: i32) -> Self {
        let (first_year, last_year) = (first_year.min(last_year), first_year.max(last_year));
        Self {
            start: jan_first(first_year),
            end: NaiveDate::from_ymd_opt(last_year, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }

    /// Expand a set of dates to whole-year boundaries.
    ///
    /// Returns `None` when the iterator is empty.
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }
        bounds.map(|(min, max)| Self::from_years(min.year(), max.year()))
    }

    pub fn first_year(&self) -> i32 {
        self.start.year()
    }

    pub fn last_year(&self) -> i32 {
        self.end.year()
    }

    /// Every year covered by the domain, in order.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year()..=self.last_year()
    }

    /// Length of the domain in days (never zero).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }
}

/// Linear date → x mapping over a fixed pixel range `[0, width]`.
///
/// The width is a layout constant, not the viewport width: the plot is wider
/// than the window and made scrollable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub domain: TemporalDomain,
    pub width: f32,
}

impl TimeScale {
    pub fn new(domain: TemporalDomain, width: f32) -> Self {
        Self { domain, width }
    }

    /// Convert a date to an x-pixel offset from the domain start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.domain.start).num_days() as f64;
        (days / self.domain.span_days() as f64 * self.width as f64) as f32
    }

    /// Total width in pixels for the whole domain.
    pub fn total_width(&self) -> f32 {
        self.width
    }
}

pub(crate) fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn domain_expands_to_whole_years() {
        let dates = [d(2023, 6, 1), d(2022, 1, 15), d(2023, 8, 1)];
        let domain = TemporalDomain::spanning(dates).unwrap();
        assert_eq!(domain.start, d(2022, 1, 1));
        assert_eq!(domain.end, d(2023, 12, 31));
        assert_eq!(domain.years().collect::<Vec<_>>(), vec![2022, 2023]);
    }

    #[test]
    fn empty_dates_have_no_domain() {
        assert!(TemporalDomain::spanning(std::iter::empty()).is_none());
    }

    #[test]
    fn scale_maps_domain_endpoints_to_range() {
        let scale = TimeScale::new(TemporalDomain::from_years(2024, 2024), 4600.0);
        assert_eq!(scale.date_to_x(d(2024, 1, 1)), 0.0);
        assert!((scale.date_to_x(d(2024, 12, 31)) - 4600.0).abs() < 1e-3);
    }

    #[test]
    fn scale_is_linear_and_monotonic() {
        let scale = TimeScale::new(TemporalDomain::from_years(2024, 2025), 1000.0);
        let a = scale.date_to_x(d(2024, 3, 1));
        let b = scale.date_to_x(d(2024, 3, 2));
        let c = scale.date_to_x(d(2024, 3, 3));
        assert!(a < b && b < c);
        assert!(((b - a) - (c - b)).abs() < 1e-3);
        let per_day = 1000.0 / scale.domain.span_days() as f32;
        assert!(((b - a) - per_day).abs() < 1e-3);
    }

    #[test]
    fn dates_outside_the_domain_land_outside_the_range() {
        let scale = TimeScale::new(TemporalDomain::from_years(2024, 2024), 4600.0);
        assert!(scale.date_to_x(d(2023, 12, 1)) < 0.0);
        assert!(scale.date_to_x(d(2025, 1, 1)) > 4600.0);
    }
}
