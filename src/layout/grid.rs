use chrono::NaiveDate;

use crate::model::timeline::jan_first;
use crate::model::TimeScale;

/// A month boundary: gridline position plus its abbreviated name.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTick {
    pub year: i32,
    pub month: u32,
    pub x: f32,
    pub label: String,
}

/// A year band `[x(Jan 1), x(next Jan 1))`.
#[derive(Debug, Clone, PartialEq)]
pub struct YearBand {
    pub year: i32,
    pub start_x: f32,
    pub end_x: f32,
}

impl YearBand {
    pub fn center_x(&self) -> f32 {
        (self.start_x + self.end_x) / 2.0
    }

    pub fn label(&self) -> String {
        self.year.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TodayMarker {
    pub date: NaiveDate,
    pub x: f32,
}

/// Month ticks, year bands and the today marker for one update.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub months: Vec<MonthTick>,
    pub years: Vec<YearBand>,
    pub today: TodayMarker,
}

/// Build the grid from the scale alone; task count plays no part.
///
/// The today marker is always emitted, even when `today` falls outside the
/// domain and so lands beyond the scrollable extent.
pub fn build_grid(scale: &TimeScale, today: NaiveDate) -> Grid {
    let domain = scale.domain;

    let months = domain
        .years()
        .flat_map(|year| (1..=12).map(move |month| (year, month)))
        .filter_map(|(year, month)| {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthTick {
                year,
                month,
                x: scale.date_to_x(first),
                label: first.format("%b").to_string(),
            })
        })
        .collect();

    let years = domain
        .years()
        .map(|year| YearBand {
            year,
            start_x: scale.date_to_x(jan_first(year)),
            // Past chrono's last year the band stops at the domain end.
            end_x: NaiveDate::from_ymd_opt(year + 1, 1, 1)
                .map_or_else(|| scale.date_to_x(domain.end), |next| scale.date_to_x(next)),
        })
        .collect();

    Grid {
        months,
        years,
        today: TodayMarker {
            date: today,
            x: scale.date_to_x(today),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemporalDomain;
    use chrono::Datelike;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn one_year_domain_has_twelve_months() {
        let scale = TimeScale::new(TemporalDomain::from_years(2024, 2024), 4600.0);
        let grid = build_grid(&scale, d(2024, 6, 15));

        let labels: Vec<_> = grid.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert_eq!(grid.months[0].x, 0.0);
        assert_eq!(grid.months[3].x, scale.date_to_x(d(2024, 4, 1)));
        assert!(grid.months.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn year_bands_cover_each_year_of_the_domain() {
        let scale = TimeScale::new(TemporalDomain::from_years(2022, 2023), 4600.0);
        let grid = build_grid(&scale, d(2024, 1, 1));

        assert_eq!(grid.months.len(), 24);
        let years: Vec<_> = grid.years.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        assert_eq!(grid.years[0].start_x, 0.0);
        assert_eq!(grid.years[0].end_x, grid.years[1].start_x);
        // The last band runs to next Jan 1, one day past the range end.
        assert!(grid.years[1].end_x > scale.total_width());
        assert_eq!(grid.years[1].label(), "2023");
        assert!(grid.years[0].center_x() > 0.0 && grid.years[0].center_x() < grid.years[0].end_x);
    }

    #[test]
    fn last_supported_year_keeps_a_positive_band() {
        let year = NaiveDate::MAX.year();
        let scale = TimeScale::new(TemporalDomain::from_years(year, year), 4600.0);
        let grid = build_grid(&scale, d(2024, 1, 1));

        let band = &grid.years[0];
        assert_eq!(band.year, year);
        assert_eq!(band.start_x, 0.0);
        assert_eq!(band.end_x, scale.date_to_x(scale.domain.end));
        assert!(band.end_x > band.start_x);
    }

    #[test]
    fn today_outside_domain_is_still_emitted() {
        let scale = TimeScale::new(TemporalDomain::from_years(2022, 2022), 4600.0);
        let grid = build_grid(&scale, d(2026, 10, 19));
        assert_eq!(grid.today.date, d(2026, 10, 19));
        assert!(grid.today.x > scale.total_width());
    }
}
