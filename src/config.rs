//! Layout constants and persisted user settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Every pixel constant the layout engine works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width of the full timeline; independent of the window size.
    pub timeline_width: f32,
    pub row_height: f32,
    pub bar_height: f32,
    /// Vertical gap between a planned bar and the actual bar below it.
    pub bar_gap: f32,
    pub header_height: f32,
    /// Width of the frozen label pane (header and column).
    pub label_pane_width: f32,
    /// Offset of the task label when a category column is shown.
    pub category_width: f32,
    /// Extra space below the last row.
    pub bottom_padding: f32,
    /// Width and height of the milestone glyph.
    pub milestone_size: f32,
    pub tooltip_offset: [f32; 2],
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            timeline_width: 4600.0,
            row_height: 50.0,
            bar_height: 14.0,
            bar_gap: 1.0,
            header_height: 60.0,
            label_pane_width: 200.0,
            category_width: 110.0,
            bottom_padding: 20.0,
            milestone_size: 12.0,
            tooltip_offset: [10.0, 10.0],
        }
    }
}

impl ChartConfig {
    /// Clamp values that would break the layout invariants.
    ///
    /// The stacked planned/actual pair must always fit inside one row.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.timeline_width.is_finite() && self.timeline_width > 0.0) {
            self.timeline_width = defaults.timeline_width;
        }
        if !(self.row_height.is_finite() && self.row_height >= 2.0) {
            self.row_height = defaults.row_height;
        }
        self.bar_gap = self.bar_gap.clamp(0.0, self.row_height / 2.0);
        let max_bar = (self.row_height - self.bar_gap) / 2.0;
        if !(self.bar_height.is_finite() && self.bar_height > 0.0) || self.bar_height > max_bar {
            tracing::warn!(
                bar_height = self.bar_height,
                max_bar,
                "bar height does not fit a stacked row, clamping"
            );
            self.bar_height = self.bar_height.clamp(1.0, max_bar.max(1.0));
        }
        self.header_height = self.header_height.max(0.0);
        self.label_pane_width = self.label_pane_width.max(0.0);
        self.category_width = self.category_width.clamp(0.0, self.label_pane_width);
        self.bottom_padding = self.bottom_padding.max(0.0);
        self.milestone_size = self.milestone_size.max(1.0);
        self
    }
}

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub chart: ChartConfig,
    /// The CSV file that was open when the app last closed.
    pub last_file: Option<PathBuf>,
}

impl AppSettings {
    /// Default location: `<config dir>/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        directories::ProjectDirs::from("", "", "gantt-timeline")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Self = serde_json::from_str(&json)?;
        settings.chart = settings.chart.sanitized();
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring settings file");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| SettingsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
