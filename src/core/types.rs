//! Common types used across the crate

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Locale identifier such as `"zh"` or `"en"`.
///
/// The set of locales is open-ended: any identifier for which a bundle file
/// exists is valid. The empty identifier is the `NONE` sentinel, which selects
/// the default bundle (the one without a locale suffix).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    /// No locale: resolves to the default bundle
    pub const NONE: Locale = Locale::from_static("");

    pub const EN: Locale = Locale::from_static("en");
    pub const ZH: Locale = Locale::from_static("zh");
    pub const ZH_CN: Locale = Locale::from_static("zh-CN");
    pub const ZH_TW: Locale = Locale::from_static("zh-TW");
    pub const JA: Locale = Locale::from_static("ja");
    pub const KO: Locale = Locale::from_static("ko");
    pub const FR: Locale = Locale::from_static("fr");
    pub const DE: Locale = Locale::from_static("de");
    pub const ES: Locale = Locale::from_static("es");
    pub const RU: Locale = Locale::from_static("ru");
    pub const TH: Locale = Locale::from_static("th");
    pub const TR: Locale = Locale::from_static("tr");
    pub const UK: Locale = Locale::from_static("uk");
    pub const UR: Locale = Locale::from_static("ur");

    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the `NONE` sentinel
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::NONE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Locale::new(code)
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Locale::new(code)
    }
}

/// Flat key/value table loaded from one bundle file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: HashMap<String, String>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Value for `key`, or an empty string when absent
    pub fn get_string(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for PropertySet {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_sentinel() {
        assert!(Locale::NONE.is_none());
        assert!(Locale::new("").is_none());
        assert_eq!(Locale::new(""), Locale::NONE);
        assert!(!Locale::ZH.is_none());
        assert_eq!(Locale::from("zh"), Locale::ZH);
        assert_eq!(Locale::default(), Locale::NONE);
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::ZH_CN.to_string(), "zh-CN");
        assert_eq!(Locale::NONE.to_string(), "<none>");
    }

    #[test]
    fn test_property_set_accessors() {
        let set: PropertySet = [("hello", "Hello"), ("bye", "Bye")].into_iter().collect();

        assert_eq!(set.len(), 2);
        assert!(set.has_key("hello"));
        assert!(!set.has_key("missing"));
        assert_eq!(set.get_string("hello"), "Hello");
        assert_eq!(set.get_string("missing"), "");
        assert_eq!(set.get("bye"), Some("Bye"));
        assert_eq!(set.get("missing"), None);
    }
}
