use std::collections::HashMap;

use egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::config::ChartConfig;
use crate::model::Task;
use crate::ui::theme;

use super::grid::Grid;
use super::normalize::TaskTable;
use super::rows::TaskGeometry;
use super::scene::{HitRegion, Layer, Scene, TextAnchor, TextShape};
use super::tooltip::TooltipContent;

/// Left inset of text in the label pane.
const TEXT_INSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneRole {
    FixedHeader,
    ScrollHeader,
    LabelColumn,
    Plot,
}

/// How a pane's scroll position is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneScroll {
    /// Never scrolls.
    Fixed,
    /// Mirrors the plot's horizontal offset.
    FollowHorizontal,
    /// Mirrors the plot's vertical offset.
    FollowVertical,
    /// The only pane the user scrolls directly.
    Driver,
}

impl PaneScroll {
    pub fn user_scrollable(self) -> bool {
        self == PaneScroll::Driver
    }

    pub fn scrollbars_visible(self) -> bool {
        self == PaneScroll::Driver
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pane {
    pub role: PaneRole,
    /// Viewport-relative rectangle the pane occupies.
    pub rect: Rect,
    /// Size of the pane's full content.
    pub content_size: Vec2,
    pub scroll: PaneScroll,
}

/// The four regions of the chart, positioned within the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneLayout {
    pub fixed_header: Pane,
    pub scroll_header: Pane,
    pub label_column: Pane,
    pub plot: Pane,
}

impl PaneLayout {
    pub fn compose(viewport: Vec2, content_height: f32, config: &ChartConfig) -> Self {
        let label_w = config.label_pane_width.min(viewport.x.max(0.0));
        let header_h = config.header_height.min(viewport.y.max(0.0));
        let right_w = (viewport.x - label_w).max(0.0);
        let body_h = (viewport.y - header_h).max(0.0);

        Self {
            fixed_header: Pane {
                role: PaneRole::FixedHeader,
                rect: Rect::from_min_size(Pos2::ZERO, vec2(label_w, header_h)),
                content_size: vec2(config.label_pane_width, config.header_height),
                scroll: PaneScroll::Fixed,
            },
            scroll_header: Pane {
                role: PaneRole::ScrollHeader,
                rect: Rect::from_min_size(pos2(label_w, 0.0), vec2(right_w, header_h)),
                content_size: vec2(config.timeline_width, config.header_height),
                scroll: PaneScroll::FollowHorizontal,
            },
            label_column: Pane {
                role: PaneRole::LabelColumn,
                rect: Rect::from_min_size(pos2(0.0, header_h), vec2(label_w, body_h)),
                content_size: vec2(config.label_pane_width, content_height),
                scroll: PaneScroll::FollowVertical,
            },
            plot: Pane {
                role: PaneRole::Plot,
                rect: Rect::from_min_size(pos2(label_w, header_h), vec2(right_w, body_h)),
                content_size: vec2(config.timeline_width, content_height),
                scroll: PaneScroll::Driver,
            },
        }
    }

    /// Panes in paint order: the driver first so followers see fresh offsets.
    pub fn panes(&self) -> [Pane; 4] {
        [self.plot, self.scroll_header, self.label_column, self.fixed_header]
    }
}

/// Offsets pushed to the two follower panes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FollowerOffsets {
    pub header_x: f32,
    pub column_y: f32,
}

/// One-directional scroll coupling from the plot to its followers.
///
/// Followers have no way to write back, so there is no feedback loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollSync {
    plot: Vec2,
    followers: FollowerOffsets,
}

impl ScrollSync {
    /// Propagate a scroll event from the plot: x to the header, y to the
    /// label column.
    pub fn on_plot_scroll(&mut self, offset: Vec2) -> FollowerOffsets {
        self.plot = offset;
        self.followers = FollowerOffsets {
            header_x: offset.x,
            column_y: offset.y,
        };
        self.followers
    }

    pub fn plot_offset(&self) -> Vec2 {
        self.plot
    }

    /// Offset a pane should be displayed at.
    pub fn offset_for(&self, scroll: PaneScroll) -> Vec2 {
        match scroll {
            PaneScroll::Fixed => Vec2::ZERO,
            PaneScroll::FollowHorizontal => vec2(self.followers.header_x, 0.0),
            PaneScroll::FollowVertical => vec2(0.0, self.followers.column_y),
            PaneScroll::Driver => self.plot,
        }
    }
}

/// Assemble all geometry into the four pane layers.
pub fn compose_scene(
    table: &TaskTable,
    rows: &[TaskGeometry],
    grid: &Grid,
    viewport: Vec2,
    config: &ChartConfig,
) -> Scene {
    let content_height = rows.len() as f32 * config.row_height + config.bottom_padding;
    let panes = PaneLayout::compose(viewport, content_height, config);
    let by_index: HashMap<usize, &Task> = table.tasks.iter().map(|t| (t.index, t)).collect();

    let hit_regions = rows
        .iter()
        .filter_map(|geometry| {
            let task = by_index.get(&geometry.index)?;
            Some(HitRegion {
                index: geometry.index,
                rect: geometry.hit_region?,
                tooltip: TooltipContent::for_task(task, table.has_category),
            })
        })
        .collect();

    Scene {
        fixed_header: fixed_header_layer(table, panes.fixed_header.content_size, config),
        scroll_header: scroll_header_layer(grid, panes.scroll_header.content_size),
        label_column: label_column_layer(
            table,
            rows,
            &by_index,
            panes.label_column.content_size,
            config,
        ),
        plot: plot_layer(rows, grid, panes.plot.content_size),
        panes,
        row_count: rows.len(),
        hit_regions,
    }
}

fn label_text(pos: Pos2, text: &str, bold: bool, color: egui::Color32) -> TextShape {
    TextShape {
        pos,
        text: text.to_string(),
        size: if bold { theme::HEADER_TEXT_SIZE } else { theme::LABEL_TEXT_SIZE },
        color,
        anchor: TextAnchor::Start,
        bold,
    }
}

fn fixed_header_layer(table: &TaskTable, size: Vec2, config: &ChartConfig) -> Layer {
    let mut layer = Layer::new(size);
    let mid = size.y / 2.0;
    layer.rect(Rect::from_min_size(Pos2::ZERO, size), theme::HEADER_BAND);
    layer.text(label_text(pos2(TEXT_INSET, mid), &table.category_title, true, theme::TEXT_ON_BAND));
    layer.text(label_text(
        pos2(config.category_width, mid),
        &table.task_title,
        true,
        theme::TEXT_ON_BAND,
    ));
    layer
}

fn scroll_header_layer(grid: &Grid, size: Vec2) -> Layer {
    let mut layer = Layer::new(size);
    let band_h = size.y / 2.0;

    layer.rect(Rect::from_min_size(Pos2::ZERO, size), theme::BG_HEADER);

    for year in &grid.years {
        layer.rect(
            Rect::from_min_max(pos2(year.start_x, 0.0), pos2(year.end_x, band_h)),
            theme::HEADER_BAND,
        );
        layer.text(TextShape {
            pos: pos2(year.center_x(), band_h / 2.0),
            text: year.label(),
            size: theme::YEAR_TEXT_SIZE,
            color: theme::TEXT_ON_BAND,
            anchor: TextAnchor::Middle,
            bold: true,
        });
    }

    for month in &grid.months {
        layer.line(
            pos2(month.x, band_h),
            pos2(month.x, size.y),
            0.5,
            theme::GRID_LINE,
        );
        layer.text(TextShape {
            pos: pos2(month.x + 4.0, band_h + band_h / 2.0),
            text: month.label.clone(),
            size: theme::MONTH_TEXT_SIZE,
            color: theme::TEXT_SECONDARY,
            anchor: TextAnchor::Start,
            bold: false,
        });
    }

    for year in &grid.years {
        layer.line(
            pos2(year.start_x, 0.0),
            pos2(year.start_x, size.y),
            1.0,
            theme::YEAR_DIVIDER,
        );
    }

    layer.line(pos2(0.0, size.y), pos2(size.x, size.y), 1.0, theme::BORDER_SUBTLE);
    layer
}

fn label_column_layer(
    table: &TaskTable,
    rows: &[TaskGeometry],
    by_index: &HashMap<usize, &Task>,
    size: Vec2,
    config: &ChartConfig,
) -> Layer {
    let mut layer = Layer::new(size);
    layer.rect(Rect::from_min_size(Pos2::ZERO, size), theme::BG_PANEL);

    for geometry in rows {
        let Some(task) = by_index.get(&geometry.index) else {
            continue;
        };
        let mid = geometry.row_rect.center().y;
        if table.has_category {
            layer.text(label_text(
                pos2(TEXT_INSET, mid),
                &task.category,
                false,
                theme::TEXT_SECONDARY,
            ));
        }
        layer.text(label_text(
            pos2(config.category_width, mid),
            &task.label,
            false,
            theme::TEXT_PRIMARY,
        ));
        let bottom = geometry.row_rect.bottom();
        layer.line(pos2(0.0, bottom), pos2(size.x, bottom), 1.0, theme::BORDER_SUBTLE);
    }
    layer
}

fn plot_layer(rows: &[TaskGeometry], grid: &Grid, size: Vec2) -> Layer {
    let mut layer = Layer::new(size);
    layer.rect(Rect::from_min_size(Pos2::ZERO, size), theme::BG_DARK);

    for geometry in rows.iter().filter(|g| g.row % 2 == 1) {
        layer.rect(geometry.row_rect, theme::BG_ROW_EVEN);
    }

    for month in &grid.months {
        layer.dashed_line(
            pos2(month.x, 0.0),
            pos2(month.x, size.y),
            0.5,
            theme::GRID_LINE,
            (3.0, 3.0),
        );
    }
    for year in &grid.years {
        layer.line(pos2(year.start_x, 0.0), pos2(year.start_x, size.y), 1.0, theme::YEAR_DIVIDER);
    }

    for geometry in rows {
        let bottom = geometry.row_rect.bottom();
        layer.line(pos2(0.0, bottom), pos2(size.x, bottom), 1.0, theme::BORDER_SUBTLE);

        if let Some(planned) = geometry.planned_bar {
            layer.rounded_rect(planned, theme::PLANNED_BAR, theme::BAR_ROUNDING);
        }
        if let Some(actual) = geometry.actual_bar {
            layer.rounded_rect(actual, theme::ACTUAL_BAR, theme::BAR_ROUNDING);
        }
        if let Some(progress) = geometry.progress {
            layer.rounded_rect(progress, theme::PROGRESS_FILL, theme::BAR_ROUNDING);
        }
        if let Some(marker) = &geometry.milestone {
            layer.path(marker.points.clone(), theme::MILESTONE);
        }
    }

    let today = grid.today.x;
    layer.dashed_line(pos2(today, 0.0), pos2(today, size.y), 1.5, theme::TODAY_LINE, (3.0, 3.0));
    layer
}
