pub mod chart;
pub mod dialogs;
pub mod theme;
pub mod toolbar;
