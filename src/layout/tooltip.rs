use chrono::NaiveDate;
use egui::{Pos2, Vec2};

use crate::model::Task;

use super::scene::Scene;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLine {
    pub text: String,
    pub strong: bool,
}

/// Text block shown while a task is hovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipContent {
    pub lines: Vec<TooltipLine>,
}

impl TooltipContent {
    /// Compose the hover text for a task.
    ///
    /// Planned dates appear only as a complete pair, progress only when known.
    pub fn for_task(task: &Task, has_category: bool) -> Self {
        let mut lines = vec![TooltipLine {
            text: task.label.clone(),
            strong: true,
        }];
        let mut push = |text: String| lines.push(TooltipLine { text, strong: false });

        if has_category && task.has_category() {
            push(format!("Category: {}", task.category));
        }
        push(format!("Start: {}", format_date(task.actual_start)));
        push(format!("End: {}", format_date(task.actual_end)));
        if let Some((start, end)) = task.planned_range() {
            push(format!("Planned Start: {}", start.format(DATE_FORMAT)));
            push(format!("Planned End: {}", end.format(DATE_FORMAT)));
        }
        if let Some(progress) = task.progress_percent {
            push(format!("Progress: {progress}%"));
        }
        Self { lines }
    }

    /// All lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

/// The single floating overlay of a chart.
///
/// Only presentation state lives here; hover events never touch layout.
#[derive(Debug, Clone)]
pub struct TooltipController {
    offset: Vec2,
    hovered: Option<usize>,
    content: Option<TooltipContent>,
    position: Pos2,
    visible: bool,
}

impl TooltipController {
    pub fn new(offset: Vec2) -> Self {
        Self {
            offset,
            hovered: None,
            content: None,
            position: Pos2::ZERO,
            visible: false,
        }
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Pointer entered the hit region of task `index`.
    pub fn on_enter(&mut self, index: usize, content: &TooltipContent) {
        self.hovered = Some(index);
        self.content = Some(content.clone());
        self.visible = true;
    }

    /// Pointer moved while hovering; the overlay follows at a fixed offset.
    pub fn on_move(&mut self, pointer: Pos2) {
        if self.hovered.is_some() {
            self.position = pointer + self.offset;
        }
    }

    pub fn on_leave(&mut self) {
        self.hovered = None;
        self.visible = false;
    }

    /// Feed one pointer sample and derive enter/move/leave transitions.
    ///
    /// `local` is the pointer in plot-local coordinates (for hit testing),
    /// `screen` the same pointer in screen space (for positioning).
    pub fn track(&mut self, scene: &Scene, local: Option<Pos2>, screen: Option<Pos2>) {
        let hit = local.and_then(|pos| scene.hit_test(pos));
        match (self.hovered, hit) {
            (Some(current), Some(region)) if current == region.index => {}
            (_, Some(region)) => {
                if self.hovered.is_some() {
                    self.on_leave();
                }
                self.on_enter(region.index, &region.tooltip);
            }
            (Some(_), None) => self.on_leave(),
            (None, None) => {}
        }
        if let Some(pointer) = screen {
            self.on_move(pointer);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Content to draw, only while visible.
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref().filter(|_| self.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn lines(content: &TooltipContent) -> Vec<&str> {
        content.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn minimal_task_lists_label_and_actual_dates() {
        let task = Task::new(0, "Design", Some(d(2024, 1, 10)), Some(d(2024, 3, 5)));
        let content = TooltipContent::for_task(&task, false);
        assert_eq!(
            lines(&content),
            vec!["Design", "Start: 2024-01-10", "End: 2024-03-05"]
        );
        assert!(content.lines[0].strong);
    }

    #[test]
    fn full_task_lists_every_field() {
        let mut task = Task::new(3, "Build", Some(d(2024, 1, 15)), None);
        task.category = "Phase 1".into();
        task.planned_start = Some(d(2024, 1, 1));
        task.planned_end = Some(d(2024, 2, 1));
        task.progress_percent = Some(42.5);
        let content = TooltipContent::for_task(&task, true);
        assert_eq!(
            lines(&content),
            vec![
                "Build",
                "Category: Phase 1",
                "Start: 2024-01-15",
                "End: n/a",
                "Planned Start: 2024-01-01",
                "Planned End: 2024-02-01",
                "Progress: 42.5%",
            ]
        );
        assert_eq!(content.text().lines().count(), 7);
    }

    #[test]
    fn enter_move_leave_drive_visibility() {
        let content = TooltipContent::default();
        let mut tooltip = TooltipController::new(vec2(10.0, 10.0));
        assert!(!tooltip.is_visible());

        tooltip.on_enter(4, &content);
        tooltip.on_move(pos2(100.0, 50.0));
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.hovered(), Some(4));
        assert_eq!(tooltip.position(), pos2(110.0, 60.0));
        assert!(tooltip.content().is_some());

        tooltip.on_leave();
        assert!(!tooltip.is_visible());
        assert!(tooltip.content().is_none());

        // Moves without a hovered task do not reposition the overlay.
        tooltip.on_move(pos2(0.0, 0.0));
        assert_eq!(tooltip.position(), pos2(110.0, 60.0));
    }
}
