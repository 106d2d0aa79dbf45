#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use gantt_timeline::app::TimelineApp;
use gantt_timeline::config::AppSettings;
use tracing_subscriber::EnvFilter;

/// Planned versus actual task schedules on a scrollable timeline.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// CSV file to open; defaults to the last file or the sample data.
    csv: Option<PathBuf>,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let settings_path = args.settings.or_else(|| match AppSettings::default_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "settings will not be persisted");
            None
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Gantt Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Gantt Timeline",
        options,
        Box::new(move |cc| Ok(Box::new(TimelineApp::new(cc, settings_path, args.csv)))),
    )
}
