use chrono::NaiveDate;
use egui::scroll_area::ScrollBarVisibility;
use egui::{
    Align2, Color32, Id, Margin, Order, Painter, Pos2, RichText, Rounding, ScrollArea, Sense, Shape,
    Stroke, Ui, UiBuilder, Vec2,
};

use crate::config::ChartConfig;
use crate::layout::scene::TextAnchor;
use crate::layout::{self, Layer, Primitive, PaneScroll, Scene, ScrollSync, TooltipController};
use crate::model::DataView;
use crate::ui::theme;

/// Host-side driver of the layout engine.
///
/// Owns the only state that outlives an update: the cached scene, the scroll
/// coupling and the tooltip overlay. The scene is rebuilt from scratch when
/// the data, the viewport size or the date changes.
pub struct ChartView {
    scene: Option<Scene>,
    viewport: Vec2,
    today: Option<NaiveDate>,
    dirty: bool,
    scroll: ScrollSync,
    tooltip: TooltipController,
}

impl ChartView {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            scene: None,
            viewport: Vec2::ZERO,
            today: None,
            dirty: true,
            scroll: ScrollSync::default(),
            tooltip: TooltipController::new(tooltip_offset(config)),
        }
    }

    /// New data arrived; rebuild on the next frame.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn task_count(&self) -> usize {
        self.scene.as_ref().map_or(0, |s| s.row_count)
    }

    /// Render the chart area (central panel).
    pub fn show(&mut self, data: Option<&DataView>, config: &ChartConfig, ui: &mut Ui) {
        let viewport = ui.available_size();
        let today = chrono::Local::now().date_naive();

        if self.dirty || viewport != self.viewport || self.today != Some(today) {
            self.scene = data.and_then(|view| layout::render(view, viewport, today, config));
            self.viewport = viewport;
            self.today = Some(today);
            self.dirty = false;
            self.tooltip.on_leave();
            self.tooltip.set_offset(tooltip_offset(config));
        }

        let Some(scene) = &self.scene else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Open a CSV file to render a timeline")
                        .size(13.0)
                        .color(theme::TEXT_DIM),
                );
            });
            return;
        };

        let (chart_rect, _) = ui.allocate_exact_size(viewport, Sense::hover());
        let origin = chart_rect.min.to_vec2();

        // The plot comes first so its followers pick up this frame's offset.
        for pane in scene.panes.panes() {
            let rect = pane.rect.translate(origin);
            let layer = scene.layer(pane.role);
            let mut child = ui.new_child(UiBuilder::new().max_rect(rect).id_salt(pane.role));

            let mut area = match pane.scroll {
                PaneScroll::Fixed => ScrollArea::neither(),
                PaneScroll::FollowHorizontal => ScrollArea::horizontal(),
                PaneScroll::FollowVertical => ScrollArea::vertical(),
                PaneScroll::Driver => ScrollArea::both(),
            }
            .id_salt(pane.role)
            .auto_shrink([false, false])
            .max_width(rect.width())
            .max_height(rect.height());

            if !pane.scroll.user_scrollable() {
                area = area
                    .enable_scrolling(false)
                    .scroll_offset(self.scroll.offset_for(pane.scroll));
            }
            if !pane.scroll.scrollbars_visible() {
                area = area.scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden);
            }

            let output = area.show(&mut child, |ui| {
                let (response, painter) = ui.allocate_painter(layer.size, Sense::hover());
                paint_layer(&painter, response.rect.min, layer);
                response
            });

            if pane.scroll == PaneScroll::Driver {
                self.scroll.on_plot_scroll(output.state.offset);
                let response = output.inner;
                let pointer = response.hover_pos();
                let local = pointer.map(|p| (p - response.rect.min).to_pos2());
                self.tooltip.track(scene, local, pointer);
            }
        }

        self.show_tooltip(ui.ctx());
    }

    fn show_tooltip(&self, ctx: &egui::Context) {
        let Some(content) = self.tooltip.content() else {
            return;
        };
        egui::Area::new(Id::new("timeline-tooltip"))
            .order(Order::Tooltip)
            .fixed_pos(self.tooltip.position())
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(theme::TOOLTIP_BG)
                    .rounding(Rounding::same(4.0))
                    .inner_margin(Margin::symmetric(10.0, 6.0))
                    .show(ui, |ui| {
                        for line in &content.lines {
                            let text = RichText::new(&line.text)
                                .font(theme::font_tooltip())
                                .color(Color32::WHITE);
                            ui.label(if line.strong { text.strong() } else { text });
                        }
                    });
            });
    }
}

fn tooltip_offset(config: &ChartConfig) -> Vec2 {
    Vec2::new(config.tooltip_offset[0], config.tooltip_offset[1])
}

/// Paint one scene layer with its content origin at `origin`.
fn paint_layer(painter: &Painter, origin: Pos2, layer: &Layer) {
    let offset = origin.to_vec2();
    for primitive in &layer.primitives {
        match primitive {
            Primitive::Rect(r) => {
                painter.rect_filled(r.rect.translate(offset), Rounding::same(r.rounding), r.fill);
            }
            Primitive::Line(l) => {
                let points = [l.from + offset, l.to + offset];
                let stroke = Stroke::new(l.width, l.color);
                match l.dash {
                    Some((dash, gap)) => {
                        painter.extend(Shape::dashed_line(&points, stroke, dash, gap));
                    }
                    None => {
                        painter.line_segment(points, stroke);
                    }
                }
            }
            Primitive::Text(t) => {
                let align = match t.anchor {
                    TextAnchor::Start => Align2::LEFT_CENTER,
                    TextAnchor::Middle => Align2::CENTER_CENTER,
                };
                let pos = t.pos + offset;
                let font = theme::font_sized(t.size);
                // No bold face in the default fonts: overstrike instead.
                if t.bold {
                    painter.text(pos + Vec2::new(0.6, 0.0), align, &t.text, font.clone(), t.color);
                }
                painter.text(pos, align, &t.text, font, t.color);
            }
            Primitive::Path(p) => {
                let points = p.points.iter().map(|pt| *pt + offset).collect();
                painter.add(Shape::convex_polygon(points, p.fill, Stroke::NONE));
            }
        }
    }
}
