use crate::app::TimelineApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  Open CSV...", icons::FOLDER_OPEN)).clicked() {
                app.open_csv();
                ui.close_menu();
            }
            let can_reload = app.source_path().is_some();
            if ui
                .add_enabled(
                    can_reload,
                    egui::Button::new(format!("{}  Reload        F5", icons::ARROW_CLOCKWISE)),
                )
                .clicked()
            {
                app.reload();
                ui.close_menu();
            }
            ui.separator();
            if ui.button(format!("{}  Load Sample Data", icons::TABLE)).clicked() {
                app.load_sample();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button(format!("{}  CSV Format", icons::QUESTION)).clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button(format!("{}  About", icons::INFO)).clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.source_name())
                    .font(theme::font_menu())
                    .color(theme::TEXT_SECONDARY),
            );
        });
    });
}
