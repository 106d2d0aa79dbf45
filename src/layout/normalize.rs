use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::model::{ColumnSchema, DataView, Task};

/// Header shown above the category column when the host did not name one.
const DEFAULT_CATEGORY_TITLE: &str = "Category";

/// Normalized rows plus the header titles for the frozen label pane.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTable {
    pub tasks: Vec<Task>,
    pub has_category: bool,
    pub category_title: String,
    pub task_title: String,
}

/// Turn the host's positional columns into uniform [`Task`] records.
///
/// Returns `None` for the empty state (no category columns, no measure
/// columns, or no rows). Malformed or missing cells never fail: they become
/// absent values on the affected task only.
pub fn normalize(view: &DataView) -> Option<TaskTable> {
    if view.is_empty() {
        return None;
    }

    let schema = ColumnSchema::resolve(view.label_column_count());
    let column = |position: usize| view.categories.get(position);
    let cell = |position: usize, row: usize| column(position).and_then(|c| c.get(row));
    let date = |position: usize, row: usize| cell(position, row).and_then(parse_date);
    let progress = view.values.first();

    let tasks: Vec<Task> = (0..view.row_count())
        .map(|index| Task {
            index,
            label: cell(schema.label, index).unwrap_or_default().to_string(),
            category: schema
                .category
                .and_then(|position| cell(position, index))
                .unwrap_or_default()
                .to_string(),
            actual_start: date(schema.actual_start, index),
            actual_end: date(schema.actual_end, index),
            planned_start: date(schema.planned_start, index),
            planned_end: date(schema.planned_end, index),
            progress_percent: progress.and_then(|c| c.get(index)),
            milestone: date(schema.milestone, index),
        })
        .collect();

    let title = |position: Option<usize>| {
        position
            .and_then(column)
            .map(|c| c.display_name.clone())
            .unwrap_or_default()
    };

    tracing::debug!(
        rows = tasks.len(),
        has_category = schema.has_category(),
        "normalized data view"
    );

    Some(TaskTable {
        has_category: schema.has_category(),
        category_title: if schema.has_category() {
            title(schema.category)
        } else {
            DEFAULT_CATEGORY_TITLE.to_string()
        },
        task_title: title(Some(schema.label)),
        tasks,
    })
}

/// Try parsing a date string with several common formats.
///
/// Date-time values keep only their calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parse a progress cell: a plain number or a number with a trailing `%`.
pub fn parse_progress(s: &str) -> Option<f64> {
    s.trim()
        .trim_end_matches('%')
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
