//! Key/value persistence for in-progress drafts.
//!
//! The controller only sees the [`DraftStore`] trait. On disk each key is a
//! single `<key>.json` file holding the raw stored text.

mod error;
mod store;

pub use error::StorageError;
pub use store::{DraftStore, FileDraftStore, MemoryStore};
