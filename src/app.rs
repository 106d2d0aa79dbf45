use chrono::{Duration, NaiveDate};
use std::path::{Path, PathBuf};

use crate::config::AppSettings;
use crate::io::csv_import;
use crate::model::{CategoryColumn, DataView, MeasureColumn};
use crate::ui;
use crate::ui::chart::ChartView;

/// Where the current data view came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    None,
    Sample,
    File(PathBuf),
}

/// Main application state.
pub struct TimelineApp {
    pub data: Option<DataView>,
    pub source: DataSource,
    pub settings: AppSettings,
    /// `None` when the platform has no config directory.
    pub settings_path: Option<PathBuf>,
    pub chart: ChartView,

    // Dialog state
    pub show_about: bool,
    pub show_csv_help: bool,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_path: Option<PathBuf>,
        initial_file: Option<PathBuf>,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = settings_path
            .as_deref()
            .map(AppSettings::load_or_default)
            .unwrap_or_default();

        let mut app = Self {
            data: None,
            source: DataSource::None,
            chart: ChartView::new(&settings.chart),
            settings,
            settings_path,
            show_about: false,
            show_csv_help: false,
            status_message: "Ready".to_string(),
        };

        let startup = initial_file.or_else(|| {
            app.settings
                .last_file
                .clone()
                .filter(|path| path.exists())
        });
        match startup {
            Some(path) => app.load_path(path),
            None => app.load_sample(),
        }
        app
    }

    pub fn source_path(&self) -> Option<&Path> {
        match &self.source {
            DataSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Short name of the current source for the toolbar.
    pub fn source_name(&self) -> String {
        match &self.source {
            DataSource::None => String::new(),
            DataSource::Sample => "Sample data".to_string(),
            DataSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    // --- Data operations ---

    pub fn open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "tsv", "txt"])
            .pick_file()
        {
            self.load_path(path);
        }
    }

    pub fn reload(&mut self) {
        if let Some(path) = self.source_path().map(Path::to_path_buf) {
            self.load_path(path);
        }
    }

    /// Load a CSV file, keeping the previous data when it fails.
    pub fn load_path(&mut self, path: PathBuf) {
        match csv_import::load_csv(&path) {
            Ok(view) => {
                self.status_message =
                    format!("Loaded {} rows from {}", view.row_count(), path.display());
                self.set_data(view, DataSource::File(path.clone()));
                self.settings.last_file = Some(path);
                self.persist_settings();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "CSV load failed");
                self.status_message = format!("CSV load failed: {}", e);
            }
        }
    }

    pub fn load_sample(&mut self) {
        let view = Self::sample_data(chrono::Local::now().date_naive());
        self.status_message = format!("Loaded {} sample rows", view.row_count());
        self.set_data(view, DataSource::Sample);
    }

    fn set_data(&mut self, view: DataView, source: DataSource) {
        self.data = Some(view);
        self.source = source;
        self.chart.invalidate();
    }

    fn persist_settings(&mut self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save settings");
        }
    }

    /// Sample schedule around `today`: two phases spanning two calendar years.
    pub fn sample_data(today: NaiveDate) -> DataView {
        let day = |offset: i64| (today + Duration::days(offset)).format("%Y-%m-%d").to_string();
        let rows: [(&str, &str, i64, i64, Option<(i64, i64)>, Option<i64>, Option<f64>); 8] = [
            ("Discovery", "Requirements", -220, -160, Some((-230, -170)), None, Some(100.0)),
            ("Discovery", "Architecture", -170, -100, Some((-170, -120)), Some(-100), Some(100.0)),
            ("Build", "Backend", -110, 40, Some((-120, 10)), None, Some(70.0)),
            ("Build", "Frontend", -80, 60, Some((-90, 30)), None, Some(55.0)),
            ("Build", "Integration", 20, 120, Some((0, 90)), Some(120), Some(0.0)),
            ("Launch", "Beta", 110, 170, None, None, None),
            ("Launch", "General availability", 170, 230, Some((150, 200)), Some(230), None),
            ("Launch", "Retrospective", 240, 250, None, None, None),
        ];

        let mut category = Vec::new();
        let mut task = Vec::new();
        let mut start = Vec::new();
        let mut end = Vec::new();
        let mut planned_start = Vec::new();
        let mut planned_end = Vec::new();
        let mut milestone = Vec::new();
        let mut progress = Vec::new();
        for (phase, name, s, e, planned, mark, pct) in rows {
            category.push(phase.to_string());
            task.push(name.to_string());
            start.push(day(s));
            end.push(day(e));
            planned_start.push(planned.map(|(ps, _)| day(ps)).unwrap_or_default());
            planned_end.push(planned.map(|(_, pe)| day(pe)).unwrap_or_default());
            milestone.push(mark.map(day).unwrap_or_default());
            progress.push(pct);
        }

        DataView {
            categories: vec![
                CategoryColumn::label("Phase", category),
                CategoryColumn::label("Task", task),
                CategoryColumn::date("Start", start),
                CategoryColumn::date("End", end),
                CategoryColumn::date("Planned start", planned_start),
                CategoryColumn::date("Planned end", planned_end),
                CategoryColumn::date("Milestone", milestone),
            ],
            values: vec![MeasureColumn::new("Progress", progress)],
        }
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.chart.task_count()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(0.0));
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            self.chart.show(self.data.as_ref(), &self.settings.chart, ui);
        });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}
