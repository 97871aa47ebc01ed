//! Playsave Prefs - Persistent preference storage
//!
//! Stores boolean preferences such as the playsave enable flag in a small
//! RON file, rewritten on every change.

mod error;
mod store;

pub use error::{Error, Result};
pub use store::FilePreferences;
