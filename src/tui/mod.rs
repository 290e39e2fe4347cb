//! TUI: App state, event loop, command dispatch, screens, widgets.

pub mod action;
pub mod app;
pub mod dispatch;
pub mod error;
pub mod screens;
pub mod widgets;

pub use app::App;
pub use dispatch::Dispatcher;
pub use error::AppError;
