//! Core module - Error handling, configuration, and common types

mod config;
mod error;
mod types;

pub use config::LangConfig;
pub use error::{Error, Result};
pub use types::{Locale, PropertySet};
