use chrono::NaiveDate;

/// A single normalized row of the chart.
///
/// Dates that were missing or failed to parse are `None`; every consumer
/// treats them as absent rather than as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Position in the host input; the join key for every column.
    pub index: usize,
    pub label: String,
    /// Grouping label, empty when the input has no category column.
    pub category: String,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    /// Percent complete, 0 to 100. Never NaN.
    pub progress_percent: Option<f64>,
    pub milestone: Option<NaiveDate>,
}

impl Task {
    /// Create a task with only its actual range set.
    pub fn new(
        index: usize,
        label: impl Into<String>,
        actual_start: Option<NaiveDate>,
        actual_end: Option<NaiveDate>,
    ) -> Self {
        Self {
            index,
            label: label.into(),
            category: String::new(),
            actual_start,
            actual_end,
            planned_start: None,
            planned_end: None,
            progress_percent: None,
            milestone: None,
        }
    }

    /// The planned range, only when both endpoints are known.
    pub fn planned_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.planned_start, self.planned_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }

    /// Every valid date this task contributes to the temporal domain.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        [
            self.actual_start,
            self.actual_end,
            self.planned_start,
            self.planned_end,
            self.milestone,
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn lone_planned_date_is_not_a_range() {
        let mut task = Task::new(0, "Build", Some(d(2024, 1, 1)), Some(d(2024, 2, 1)));
        task.planned_start = Some(d(2024, 1, 5));
        assert_eq!(task.planned_range(), None);

        task.planned_end = Some(d(2024, 1, 20));
        assert_eq!(task.planned_range(), Some((d(2024, 1, 5), d(2024, 1, 20))));
    }

    #[test]
    fn dates_include_lone_planned_and_milestone() {
        let mut task = Task::new(0, "Build", None, Some(d(2024, 2, 1)));
        task.planned_end = Some(d(2025, 1, 1));
        task.milestone = Some(d(2023, 7, 1));
        let dates: Vec<_> = task.dates().collect();
        assert_eq!(dates, vec![d(2024, 2, 1), d(2025, 1, 1), d(2023, 7, 1)]);
    }
}
