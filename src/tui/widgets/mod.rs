//! Reusable TUI widgets.

mod alert;
mod form;
mod status_bar;

pub use alert::draw_alert;
pub use form::{FocusRing, FormRow, draw_form};
pub use status_bar::{StatusBarContext, draw_status_bar};
