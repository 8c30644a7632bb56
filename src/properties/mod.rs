//! Property bundle loading
//!
//! A bundle is a family of `.properties` files sharing one name: the default
//! file `{bundle}.properties` and one `{bundle}_{locale}.properties` per
//! translated locale, all in the same directory.
//!
//! Loading goes through the `PropertySource` trait so the locale cache can be
//! fed from somewhere other than the filesystem. `PropertiesFile` is the
//! standard file-backed source.

mod parser;

pub use parser::parse;

use crate::core::{Error, Locale, PropertySet, Result};
use encoding_rs::Encoding;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Loads a `PropertySet` from a resolved bundle path
pub trait PropertySource: Send + Sync {
    /// Load the bundle at `path`. Fails with `Error::ResourceNotFound` when
    /// the resource does not exist and `Error::Parse` when it is malformed.
    fn load(&self, path: &Path) -> Result<PropertySet>;

    /// File extension of bundles served by this source, without the dot
    fn extension(&self) -> &str {
        "properties"
    }
}

/// Resolve the path of a bundle file
///
/// `{dir}/{bundle}_{locale}.{ext}` for a locale, `{dir}/{bundle}.{ext}` for `Locale::NONE`.
pub fn resource_path(dir: &Path, bundle: &str, locale: &Locale, extension: &str) -> PathBuf {
    let file_name = if locale.is_none() {
        format!("{}.{}", bundle, extension)
    } else {
        format!("{}_{}.{}", bundle, locale.as_str(), extension)
    };
    dir.join(file_name)
}

/// File-backed `.properties` source
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesFile {
    encoding: Option<&'static Encoding>,
}

impl PropertiesFile {
    /// Source that reads UTF-8, falling back to GBK for files that are not valid UTF-8
    pub fn new() -> Self {
        Self { encoding: None }
    }

    /// Source that decodes every file strictly with `encoding`
    pub fn with_encoding(encoding: &'static Encoding) -> Self {
        Self {
            encoding: Some(encoding),
        }
    }

    pub fn encoding(&self) -> Option<&'static Encoding> {
        self.encoding
    }

    fn decode(&self, bytes: &[u8], path: &Path) -> Result<String> {
        match self.encoding {
            Some(encoding) => decode_strict(encoding, bytes, path),
            None => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                match std::str::from_utf8(bytes) {
                    Ok(text) => Ok(text.to_string()),
                    Err(_) => {
                        log::debug!("{} is not UTF-8, decoding as GBK", path.display());
                        decode_strict(encoding_rs::GBK, bytes, path)
                    }
                }
            }
        }
    }
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8], path: &Path) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        let line = text
            .find('\u{FFFD}')
            .map(|pos| text[..pos].matches('\n').count() + 1)
            .unwrap_or(1);
        return Err(Error::Parse {
            path: path.to_path_buf(),
            line,
            reason: format!("content is not valid {}", encoding.name()),
        });
    }
    Ok(text.into_owned())
}

impl PropertySource for PropertiesFile {
    fn load(&self, path: &Path) -> Result<PropertySet> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ResourceNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(Error::Io(e)),
        };
        let content = self.decode(&bytes, path)?;
        parse(&content, path)
    }
}
