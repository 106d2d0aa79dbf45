use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Gantt Timeline").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Planned versus actual schedules");
                ui.label("on a multi-year timeline.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

const CSV_COLUMNS: [(&str, &str, &str); 8] = [
    ("Task", "required", "task, name, task name, label, title, activity"),
    ("Start", "required", "start, start date, actual start, from, begin"),
    ("End", "required", "end, end date, actual end, to, finish, due"),
    ("Category", "optional", "category, phase, group, stage, section, workstream"),
    ("Planned start", "optional", "planned start, plan start, baseline start"),
    ("Planned end", "optional", "planned end, planned finish, baseline end"),
    ("Milestone", "optional", "milestone, milestone date, deadline"),
    ("Progress", "optional", "progress, percent complete, % complete, pct"),
];

/// Render the "CSV Format" help dialog.
pub fn show_csv_help_dialog(app: &mut TimelineApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 380.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(RichText::new("Delimiters").strong());
            ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
            ui.add_space(8.0);

            ui.label(RichText::new("Columns").strong());
            ui.add_space(2.0);
            egui::Grid::new("csv_columns")
                .num_columns(3)
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Column").underline());
                    ui.label(RichText::new("Need").underline());
                    ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                    ui.end_row();
                    for (name, need, headers) in CSV_COLUMNS {
                        ui.label(name);
                        ui.label(RichText::new(need).color(theme::TEXT_DIM));
                        ui.label(RichText::new(headers).color(theme::TEXT_SECONDARY));
                        ui.end_row();
                    }
                });
            ui.add_space(8.0);

            ui.label(RichText::new("Values").strong());
            ui.label("Dates: YYYY-MM-DD, DD/MM/YYYY, DD.MM.YYYY or ISO date-times.");
            ui.label("Progress: a number from 0 to 100, optionally followed by %.");
            ui.label("Unreadable cells are left empty; the row is still shown.");
            ui.add_space(10.0);

            if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
