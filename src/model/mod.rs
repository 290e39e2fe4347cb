mod document;
mod draft;
mod layout;
mod validation;
mod window;

pub use document::{CategoryOption, Field, ReportForm, Section, Selector};
pub use draft::Draft;
pub use layout::{CategorySpec, FieldSpec, FormLayout, SectionSpec, SelectorSpec};
pub use validation::{LayoutError, validate_field_name, validate_layout};
pub use window::{Clock, FixedClock, SystemClock, TimeWindow, format_de};
