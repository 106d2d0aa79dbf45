pub mod table;
pub mod task;
pub mod timeline;

pub use table::{CategoryColumn, ColumnKind, ColumnSchema, DataView, MeasureColumn};
pub use task::Task;
pub use timeline::{TemporalDomain, TimeScale};
