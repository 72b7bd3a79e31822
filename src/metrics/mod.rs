pub mod collector;
pub mod engine;
pub mod model;

pub use collector::ReportProgress;
pub use engine::{build_report, EngineOptions};
pub use model::MetricsReport;
