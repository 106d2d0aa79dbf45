//! Declarative scene description handed to the painting backend.
//!
//! Coordinates are local to the pane a [`Layer`] belongs to; the backend
//! adds the pane origin and its scroll offset.

use egui::{Color32, Pos2, Rect, Vec2};

use super::panes::{PaneLayout, PaneRole};
use super::tooltip::TooltipContent;

/// Horizontal anchoring of a text primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectShape {
    pub rect: Rect,
    pub fill: Color32,
    pub rounding: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub from: Pos2,
    pub to: Pos2,
    pub width: f32,
    pub color: Color32,
    /// Dash and gap length; `None` for a solid line.
    pub dash: Option<(f32, f32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextShape {
    /// Anchor point; vertically the text is centered on it.
    pub pos: Pos2,
    pub text: String,
    pub size: f32,
    pub color: Color32,
    pub anchor: TextAnchor,
    pub bold: bool,
}

/// A closed filled polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub points: Vec<Pos2>,
    pub fill: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(RectShape),
    Line(LineShape),
    Text(TextShape),
    Path(PathShape),
}

/// Primitives of one pane, painted in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    /// Full content size; larger than the pane when it scrolls.
    pub size: Vec2,
    pub primitives: Vec<Primitive>,
}

impl Layer {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            primitives: Vec::new(),
        }
    }

    pub fn rect(&mut self, rect: Rect, fill: Color32) {
        self.primitives.push(Primitive::Rect(RectShape {
            rect,
            fill,
            rounding: 0.0,
        }));
    }

    pub fn rounded_rect(&mut self, rect: Rect, fill: Color32, rounding: f32) {
        self.primitives.push(Primitive::Rect(RectShape {
            rect,
            fill,
            rounding,
        }));
    }

    pub fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.primitives.push(Primitive::Line(LineShape {
            from,
            to,
            width,
            color,
            dash: None,
        }));
    }

    pub fn dashed_line(
        &mut self,
        from: Pos2,
        to: Pos2,
        width: f32,
        color: Color32,
        dash: (f32, f32),
    ) {
        self.primitives.push(Primitive::Line(LineShape {
            from,
            to,
            width,
            color,
            dash: Some(dash),
        }));
    }

    pub fn text(&mut self, text: TextShape) {
        self.primitives.push(Primitive::Text(text));
    }

    pub fn path(&mut self, points: Vec<Pos2>, fill: Color32) {
        self.primitives.push(Primitive::Path(PathShape { points, fill }));
    }

    /// Rectangles filled with `color`, in paint order.
    pub fn rects_filled_with(&self, color: Color32) -> impl Iterator<Item = &Rect> {
        self.primitives.iter().filter_map(move |p| match p {
            Primitive::Rect(r) if r.fill == color => Some(&r.rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextShape> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(t) => Some(t),
            _ => None,
        })
    }
}

/// Invisible interaction rectangle covering one task in the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRegion {
    /// The task's input index.
    pub index: usize,
    pub rect: Rect,
    pub tooltip: TooltipContent,
}

/// The complete chart for one update.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub panes: PaneLayout,
    pub fixed_header: Layer,
    pub scroll_header: Layer,
    pub label_column: Layer,
    pub plot: Layer,
    /// Number of task rows, dated or not.
    pub row_count: usize,
    /// Plot-local hit regions, one per task with any horizontal extent.
    pub hit_regions: Vec<HitRegion>,
}

impl Scene {
    pub fn layer(&self, role: PaneRole) -> &Layer {
        match role {
            PaneRole::FixedHeader => &self.fixed_header,
            PaneRole::ScrollHeader => &self.scroll_header,
            PaneRole::LabelColumn => &self.label_column,
            PaneRole::Plot => &self.plot,
        }
    }

    /// Topmost hit region under a plot-local point.
    pub fn hit_test(&self, pos: Pos2) -> Option<&HitRegion> {
        self.hit_regions.iter().rev().find(|h| h.rect.contains(pos))
    }
}
