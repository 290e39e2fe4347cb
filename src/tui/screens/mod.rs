//! TUI screen implementations.

pub mod closed;
pub mod report;

pub use closed::{ClosedScreenState, draw_closed};
pub use report::{ReportScreenState, draw_report};
