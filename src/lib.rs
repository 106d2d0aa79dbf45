//! Gantt timeline: a pure layout engine that turns tabular task data into a
//! declarative four-pane scene, plus the egui shell that paints it.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod ui;
