use chrono::NaiveDate;
use egui::{pos2, vec2, Pos2, Rect};

use crate::config::ChartConfig;
use crate::model::{Task, TimeScale};

/// Minimum drawn width of any bar or hit region.
const MIN_BAR_WIDTH: f32 = 1.0;

/// Right-pointing triangle marking a milestone date.
#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneMarker {
    pub points: Vec<Pos2>,
}

/// Plot-local geometry of one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGeometry {
    /// The task's input index.
    pub index: usize,
    /// Display row, top to bottom.
    pub row: usize,
    /// The full horizontal band owned by this row.
    pub row_rect: Rect,
    /// `None` only when both actual dates are missing.
    pub actual_bar: Option<Rect>,
    pub planned_bar: Option<Rect>,
    pub progress: Option<Rect>,
    pub milestone: Option<MilestoneMarker>,
    pub hit_region: Option<Rect>,
}

/// Display order: by actual start ascending, then by input index.
///
/// Tasks without a valid start sort after every dated task. Returns
/// positions into `tasks`; the tasks themselves are left untouched.
pub fn row_order(tasks: &[Task]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by_key(|&i| {
        let task = &tasks[i];
        (task.actual_start.is_none(), task.actual_start, task.index)
    });
    order
}

/// Lay out every task into uniform rows against one shared scale.
pub fn layout_rows(tasks: &[Task], scale: &TimeScale, config: &ChartConfig) -> Vec<TaskGeometry> {
    row_order(tasks)
        .into_iter()
        .enumerate()
        .map(|(row, position)| layout_task(&tasks[position], row, scale, config))
        .collect()
}

fn layout_task(task: &Task, row: usize, scale: &TimeScale, config: &ChartConfig) -> TaskGeometry {
    let top = row as f32 * config.row_height;
    let bar_height = config.bar_height;
    let planned_range = task.planned_range();

    // Planned above actual as a centered pair, or the actual bar centered alone.
    let (planned_y, actual_y) = if planned_range.is_some() {
        let stack = 2.0 * bar_height + config.bar_gap;
        let planned_y = top + (config.row_height - stack) / 2.0;
        (Some(planned_y), planned_y + bar_height + config.bar_gap)
    } else {
        (None, top + (config.row_height - bar_height) / 2.0)
    };

    let actual_span = match (task.actual_start, task.actual_end) {
        (Some(start), Some(end)) => Some(span(scale, start, end)),
        (Some(only), None) | (None, Some(only)) => Some(span(scale, only, only)),
        (None, None) => None,
    };
    let planned_span = planned_range.map(|(start, end)| span(scale, start, end));

    let actual_bar = actual_span.map(|(x, w)| bar_rect(x, w, actual_y, bar_height));
    let planned_bar = planned_span
        .zip(planned_y)
        .map(|((x, w), y)| bar_rect(x, w, y, bar_height));

    let progress = actual_bar.zip(task.progress_percent).map(|(bar, percent)| {
        let width = bar.width() * (percent.clamp(0.0, 100.0) / 100.0) as f32;
        Rect::from_min_size(bar.min, vec2(width, bar_height))
    });

    let marker_y = actual_y + bar_height / 2.0;
    let milestone = task
        .milestone
        .map(|date| milestone_marker(pos2(scale.date_to_x(date), marker_y), config.milestone_size));

    let hit_region = [actual_span, planned_span]
        .into_iter()
        .flatten()
        .map(|(x, w)| (x, x + w))
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))
        .map(|(x0, x1)| {
            let width = (x1 - x0).max(MIN_BAR_WIDTH);
            Rect::from_min_size(pos2(x0, top), vec2(width, config.row_height))
        });

    TaskGeometry {
        index: task.index,
        row,
        row_rect: Rect::from_min_size(pos2(0.0, top), vec2(scale.total_width(), config.row_height)),
        actual_bar,
        planned_bar,
        progress,
        milestone,
        hit_region,
    }
}

/// Left edge and width (at least one pixel) of a date range.
fn span(scale: &TimeScale, start: NaiveDate, end: NaiveDate) -> (f32, f32) {
    let x0 = scale.date_to_x(start);
    let x1 = scale.date_to_x(end);
    (x0, (x1 - x0).max(MIN_BAR_WIDTH))
}

fn bar_rect(x: f32, width: f32, y: f32, height: f32) -> Rect {
    Rect::from_min_size(pos2(x, y), vec2(width, height))
}

fn milestone_marker(center: Pos2, size: f32) -> MilestoneMarker {
    let half = size / 2.0;
    MilestoneMarker {
        points: vec![
            pos2(center.x - half, center.y - half),
            pos2(center.x + half, center.y),
            pos2(center.x - half, center.y + half),
        ],
    }
}
