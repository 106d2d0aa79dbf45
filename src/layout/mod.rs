//! The timeline layout engine.
//!
//! [`render`] is the single entry point: it turns one snapshot of host data
//! into a complete [`Scene`]. Nothing is cached between calls.

pub mod grid;
pub mod normalize;
pub mod panes;
pub mod rows;
pub mod scene;
pub mod tooltip;

use chrono::{Datelike, NaiveDate};
use egui::Vec2;

use crate::config::ChartConfig;
use crate::model::{DataView, Task, TemporalDomain, TimeScale};

pub use grid::{build_grid, Grid};
pub use normalize::{normalize, TaskTable};
pub use panes::{compose_scene, PaneLayout, PaneRole, PaneScroll, ScrollSync};
pub use rows::{layout_rows, TaskGeometry};
pub use scene::{HitRegion, Layer, Primitive, Scene};
pub use tooltip::{TooltipContent, TooltipController};

/// Build the whole chart for one update.
///
/// Returns `None` for the empty state (no columns, no measures, no rows).
/// `today` positions the today marker and is the fallback domain year when
/// no task carries a single valid date.
pub fn render(
    view: &DataView,
    viewport: Vec2,
    today: NaiveDate,
    config: &ChartConfig,
) -> Option<Scene> {
    let table = normalize(view)?;

    let domain = TemporalDomain::spanning(table.tasks.iter().flat_map(Task::dates))
        .unwrap_or_else(|| {
            tracing::debug!(year = today.year(), "no valid dates, using the current year");
            TemporalDomain::from_years(today.year(), today.year())
        });
    let scale = TimeScale::new(domain, config.timeline_width);

    let lone_planned = table
        .tasks
        .iter()
        .filter(|t| t.planned_start.is_some() != t.planned_end.is_some())
        .count();
    if lone_planned > 0 {
        tracing::debug!(count = lone_planned, "ignoring planned ranges with a single date");
    }

    let rows = layout_rows(&table.tasks, &scale, config);
    let grid = build_grid(&scale, today);
    tracing::debug!(
        rows = rows.len(),
        first_year = domain.first_year(),
        last_year = domain.last_year(),
        "laid out timeline"
    );

    Some(compose_scene(&table, &rows, &grid, viewport, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryColumn, MeasureColumn};
    use crate::ui::theme;
    use egui::{pos2, vec2};
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 6, 1)
    }

    /// Columns: task, start, end, planned start, planned end.
    fn tasks_view(rows: &[(&str, &str, &str, &str, &str)], progress: Vec<Option<f64>>) -> DataView {
        DataView {
            categories: vec![
                CategoryColumn::label("Task", rows.iter().map(|r| r.0).collect::<Vec<_>>()),
                CategoryColumn::date("Start", rows.iter().map(|r| r.1).collect::<Vec<_>>()),
                CategoryColumn::date("End", rows.iter().map(|r| r.2).collect::<Vec<_>>()),
                CategoryColumn::date("Planned start", rows.iter().map(|r| r.3).collect::<Vec<_>>()),
                CategoryColumn::date("Planned end", rows.iter().map(|r| r.4).collect::<Vec<_>>()),
            ],
            values: vec![MeasureColumn::new("Progress", progress)],
        }
    }

    fn run(view: &DataView) -> Scene {
        render(view, vec2(1200.0, 700.0), today(), &ChartConfig::default()).unwrap()
    }

    fn scale(first: i32, last: i32) -> TimeScale {
        let width = ChartConfig::default().timeline_width;
        TimeScale::new(TemporalDomain::from_years(first, last), width)
    }

    fn year_labels(scene: &Scene) -> Vec<String> {
        scene
            .scroll_header
            .texts()
            .filter(|t| t.bold)
            .map(|t| t.text.clone())
            .collect()
    }

    fn month_labels(scene: &Scene) -> Vec<String> {
        scene
            .scroll_header
            .texts()
            .filter(|t| !t.bold)
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn empty_data_renders_nothing() {
        let config = ChartConfig::default();
        assert!(render(&DataView::default(), vec2(800.0, 600.0), today(), &config).is_none());
    }

    #[test]
    fn single_design_task() {
        let scene = run(&tasks_view(&[("Design", "2024-01-10", "2024-03-05", "", "")], vec![None]));
        let scale = scale(2024, 2024);

        let bars: Vec<_> = scene.plot.rects_filled_with(theme::ACTUAL_BAR).collect();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].left(), scale.date_to_x(d(2024, 1, 10)));
        assert!((bars[0].right() - scale.date_to_x(d(2024, 3, 5))).abs() < 1e-3);
        assert_eq!(scene.plot.rects_filled_with(theme::PLANNED_BAR).count(), 0);
        assert_eq!(scene.plot.rects_filled_with(theme::PROGRESS_FILL).count(), 0);
        assert!(!scene.plot.primitives.iter().any(|p| matches!(p, Primitive::Path(_))));

        assert_eq!(year_labels(&scene), vec!["2024"]);
        assert_eq!(month_labels(&scene).len(), 12);
        assert_eq!(month_labels(&scene)[0], "Jan");
        assert_eq!(month_labels(&scene)[11], "Dec");
        assert_eq!(scene.hit_regions.len(), 1);
    }

    #[test]
    fn rows_sorted_by_start_and_grid_spans_both_years() {
        let scene = run(&tasks_view(
            &[
                ("Later", "2023-06-01", "2023-08-01", "", ""),
                ("Earlier", "2022-01-01", "2022-02-01", "", ""),
            ],
            vec![None, None],
        ));

        let labels: Vec<_> = scene
            .label_column
            .texts()
            .map(|t| (t.text.clone(), t.pos.y))
            .collect();
        assert_eq!(labels[0].0, "Earlier");
        assert_eq!(labels[1].0, "Later");
        assert!(labels[0].1 < labels[1].1);

        // Hit regions keep the input index as the join key.
        let order: Vec<_> = scene.hit_regions.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![1, 0]);
        assert_eq!(year_labels(&scene), vec!["2022", "2023"]);
        assert_eq!(month_labels(&scene).len(), 24);
    }

    #[test]
    fn planned_and_actual_bars_stack_in_one_row() {
        let config = ChartConfig::default();
        let scene = run(&tasks_view(
            &[("Build", "2024-01-15", "2024-03-01", "2024-01-01", "2024-02-01")],
            vec![Some(25.0)],
        ));

        let planned: Vec<_> = scene.plot.rects_filled_with(theme::PLANNED_BAR).collect();
        let actual: Vec<_> = scene.plot.rects_filled_with(theme::ACTUAL_BAR).collect();
        assert_eq!((planned.len(), actual.len()), (1, 1));
        assert_eq!(actual[0].top() - planned[0].bottom(), config.bar_gap);
        assert!(actual[0].bottom() - planned[0].top() <= config.row_height);

        let progress: Vec<_> = scene.plot.rects_filled_with(theme::PROGRESS_FILL).collect();
        assert_eq!(progress.len(), 1);
        assert!((progress[0].width() - actual[0].width() * 0.25).abs() < 1e-3);
    }

    #[test]
    fn rows_with_and_without_plans_share_one_height() {
        let config = ChartConfig::default();
        let scene = run(&tasks_view(
            &[
                ("Plain", "2024-01-01", "2024-02-01", "", ""),
                ("Planned", "2024-03-01", "2024-04-01", "2024-02-15", "2024-03-20"),
                ("Half planned", "2024-05-01", "2024-06-01", "2024-04-01", ""),
            ],
            vec![],
        ));
        assert_eq!(scene.plot.rects_filled_with(theme::PLANNED_BAR).count(), 1);
        for region in &scene.hit_regions {
            assert_eq!(region.rect.height(), config.row_height);
        }
        let content_height = 3.0 * config.row_height + config.bottom_padding;
        assert_eq!(scene.panes.plot.content_size.y, content_height);
    }

    #[test]
    fn short_label_column_still_renders_every_bar() {
        let view = DataView {
            categories: vec![
                CategoryColumn::label("Phase", ["Plan"]),
                CategoryColumn::label("Task", ["Design"]),
                CategoryColumn::date("Start", ["2024-01-10", "2024-02-01", "2024-03-01"]),
                CategoryColumn::date("End", ["2024-01-20", "2024-02-10", "2024-03-15"]),
            ],
            values: vec![MeasureColumn::new("Progress", vec![])],
        };
        let scene = run(&view);
        assert_eq!(scene.plot.rects_filled_with(theme::ACTUAL_BAR).count(), 3);
        assert_eq!(scene.hit_regions.len(), 3);
    }

    #[test]
    fn milestone_and_out_of_range_dates_widen_the_domain() {
        let view = DataView {
            categories: vec![
                CategoryColumn::label("Task", ["Launch"]),
                CategoryColumn::date("Start", ["2024-01-10"]),
                CategoryColumn::date("End", ["2024-03-05"]),
                CategoryColumn::date("Planned start", [""]),
                CategoryColumn::date("Planned end", ["2025-02-01"]),
                CategoryColumn::date("Milestone", ["2023-12-24"]),
            ],
            values: vec![MeasureColumn::new("Progress", vec![None])],
        };
        let scene = run(&view);
        assert_eq!(year_labels(&scene), vec!["2023", "2024", "2025"]);
        assert_eq!(scene.plot.rects_filled_with(theme::PLANNED_BAR).count(), 0);
        assert!(scene.plot.primitives.iter().any(|p| matches!(p, Primitive::Path(_))));
    }

    #[test]
    fn grid_is_stable_while_another_task_spans_the_same_years() {
        let base = [
            ("A", "2022-03-01", "2023-10-01", "", ""),
            ("B", "2022-05-01", "2022-06-01", "", ""),
        ];
        let with = run(&tasks_view(&base, vec![]));
        let without = run(&tasks_view(&base[..1], vec![]));
        assert_eq!(with.scroll_header, without.scroll_header);
    }

    #[test]
    fn undated_input_falls_back_to_the_current_year() {
        let scene = run(&tasks_view(&[("Mystery", "soon", "later", "", "")], vec![]));
        assert_eq!(year_labels(&scene), vec!["2024"]);
        assert!(scene.hit_regions.is_empty());
        assert_eq!(scene.label_column.texts().count(), 1);
    }

    #[test]
    fn today_marker_spans_the_plot() {
        let scene = run(&tasks_view(&[("Design", "2024-01-10", "2024-03-05", "", "")], vec![]));
        let x = scale(2024, 2024).date_to_x(today());
        let today_line = scene.plot.primitives.iter().find_map(|p| match p {
            Primitive::Line(l) if l.color == theme::TODAY_LINE => Some(l.clone()),
            _ => None,
        });
        let line = today_line.unwrap();
        assert_eq!((line.from.x, line.to.x), (x, x));
        assert_eq!(line.from.y, 0.0);
        assert_eq!(line.to.y, scene.panes.plot.content_size.y);
        assert!(line.dash.is_some());
    }

    #[test]
    fn hovering_a_bar_shows_its_tooltip() {
        let scene = run(&tasks_view(
            &[("Design", "2024-01-10", "2024-03-05", "", "")],
            vec![Some(40.0)],
        ));
        let region = scene.hit_regions[0].rect;
        let mut tooltip = TooltipController::new(vec2(10.0, 10.0));

        tooltip.track(&scene, Some(region.center()), Some(pos2(300.0, 200.0)));
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.hovered(), Some(0));
        assert_eq!(tooltip.position(), pos2(310.0, 210.0));
        let text = tooltip.content().unwrap().text();
        assert!(text.starts_with("Design\nStart: 2024-01-10\nEnd: 2024-03-05"));
        assert!(text.ends_with("Progress: 40%"));

        tooltip.track(&scene, Some(region.center() + vec2(1.0, 0.0)), Some(pos2(301.0, 200.0)));
        assert_eq!(tooltip.position(), pos2(311.0, 210.0));

        tooltip.track(&scene, Some(pos2(region.right() + 50.0, region.center().y)), None);
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.hovered(), None);
    }

    #[test]
    fn year_dividers_sit_on_each_year_start() {
        let scene = run(&tasks_view(
            &[
                ("A", "2022-01-10", "2022-03-01", "", ""),
                ("B", "2023-02-01", "2023-04-01", "", ""),
            ],
            vec![],
        ));
        let grid = build_grid(&scale(2022, 2023), today());
        let starts: Vec<f32> = grid.years.iter().map(|y| y.start_x).collect();
        assert_eq!(starts.len(), 2);

        let dividers = |layer: &Layer| -> Vec<f32> {
            layer
                .primitives
                .iter()
                .filter_map(|p| match p {
                    Primitive::Line(l) if l.color == theme::YEAR_DIVIDER => {
                        assert_eq!(l.from.x, l.to.x);
                        Some(l.from.x)
                    }
                    _ => None,
                })
                .collect()
        };
        assert_eq!(dividers(&scene.plot), starts);
        assert_eq!(dividers(&scene.scroll_header), starts);
    }

    #[test]
    fn moving_between_bars_switches_the_tooltip() {
        let scene = run(&tasks_view(
            &[
                ("A", "2022-01-10", "2022-03-01", "", ""),
                ("B", "2023-02-01", "2023-04-01", "", ""),
            ],
            vec![],
        ));
        let a = scene.hit_regions.iter().find(|h| h.index == 0).unwrap().rect;
        let b = scene.hit_regions.iter().find(|h| h.index == 1).unwrap().rect;
        let mut tooltip = TooltipController::new(vec2(10.0, 10.0));

        tooltip.track(&scene, Some(a.center()), Some(pos2(100.0, 100.0)));
        assert_eq!(tooltip.hovered(), Some(0));
        assert!(tooltip.content().unwrap().text().starts_with("A\nStart: 2022-01-10"));

        tooltip.track(&scene, Some(b.center()), Some(pos2(900.0, 150.0)));
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.hovered(), Some(1));
        let text = tooltip.content().unwrap().text();
        assert!(text.starts_with("B\nStart: 2023-02-01"));
        assert!(!text.contains("2022-01-10"));
        assert_eq!(tooltip.position(), pos2(910.0, 160.0));
    }

    #[test]
    fn undated_rows_count_as_rows_without_hit_regions() {
        let scene = run(&tasks_view(
            &[
                ("Design", "2024-01-10", "2024-03-05", "", ""),
                ("Mystery", "", "", "", ""),
                ("Build", "2024-03-06", "2024-05-01", "", ""),
            ],
            vec![],
        ));
        assert_eq!(scene.row_count, 3);
        assert_eq!(scene.hit_regions.len(), 2);
        assert_eq!(scene.label_column.texts().count(), 3);
    }
}
