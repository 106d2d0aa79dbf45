use std::path::PathBuf;

/// Failure to turn a CSV file into a data view.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing required columns ({missing}); found headers: {found:?}")]
    MissingColumns { missing: String, found: Vec<String> },
    #[error("CSV file has no data rows")]
    NoRows,
}

/// Failure to read or write the persisted settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("settings IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
