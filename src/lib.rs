//! Globalization library
//!
//! Resolves localized text by key from per-locale `.properties` bundles,
//! falling back to the default bundle when the active locale lacks a key.
//!
//! ```no_run
//! use globalization::{Lang, Locale};
//!
//! let mut lang = Lang::new("message", "i18n", Locale::ZH)?;
//! println!("{}", lang.get("app.title"));
//! lang.set_locale(Locale::EN)?;
//! # Ok::<(), globalization::Error>(())
//! ```

pub mod core;
pub mod lang;
pub mod properties;

pub use crate::core::{Error, LangConfig, Locale, PropertySet, Result};
pub use crate::lang::{Encoder, Lang, Sweeper, DEFAULT_SWEEPER_THRESHOLD};
pub use crate::properties::{PropertiesFile, PropertySource};
