//! Configuration management

use crate::core::{Error, Locale, Result};
use crate::properties::PropertiesFile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Description of a `Lang` instance, loadable from TOML
///
/// ```toml
/// bundle = "message"
/// dir = "i18n"
/// locale = "zh"
/// sweeper_threshold = 4
/// encoding = "gbk"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangConfig {
    /// Bundle name, e.g. "message" for `message_zh.properties`
    pub bundle: String,
    /// Directory holding the bundle files
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Initial locale; empty selects the default bundle
    #[serde(default)]
    pub locale: Locale,
    /// Cached-locale count that triggers the sweeper (0 = never)
    #[serde(default)]
    pub sweeper_threshold: i64,
    /// encoding_rs label of the bundle files; unset means UTF-8 with GBK fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

fn default_dir() -> PathBuf { PathBuf::from(".") }

impl LangConfig {
    pub fn new(bundle: impl Into<String>, dir: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            bundle: bundle.into(),
            dir: dir.into(),
            locale,
            sweeper_threshold: 0,
            encoding: None,
        }
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LangConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.bundle.trim().is_empty() {
            return Err(Error::Config("bundle name must not be empty".to_string()));
        }
        self.source()?;
        Ok(())
    }

    /// Build the property source described by `encoding`
    pub fn source(&self) -> Result<PropertiesFile> {
        match &self.encoding {
            None => Ok(PropertiesFile::new()),
            Some(label) => encoding_rs::Encoding::for_label(label.trim().as_bytes())
                .map(PropertiesFile::with_encoding)
                .ok_or_else(|| Error::Config(format!("Unknown encoding: {}", label))),
        }
    }
}
