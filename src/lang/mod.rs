//! Locale cache
//!
//! `Lang` resolves translation keys against the active locale's bundle and
//! falls back to the default bundle. Bundles are loaded lazily the first time
//! a locale is selected and kept for fast switching afterwards. Once the
//! number of cached locales reaches the sweeper threshold, the installed
//! sweeper is called so it can shrink the cache (usually with `reset`).
//!
//! `Lang` does no locking. Share it between threads behind a single mutex.

pub mod encoder;

pub use encoder::Encoder;

use crate::core::{LangConfig, Locale, PropertySet, Result};
use crate::properties::{self, PropertiesFile, PropertySource};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Threshold applied by `set_sweeper` when none was configured
pub const DEFAULT_SWEEPER_THRESHOLD: usize = 5;

/// Callback invoked when the cache reaches the sweeper threshold.
/// It receives the cache and may mutate it.
pub type Sweeper = Box<dyn FnMut(&mut Lang) + Send>;

/// Translation lookup with a per-locale bundle cache
pub struct Lang {
    bundle: String,
    bundle_dir: PathBuf,
    source: Box<dyn PropertySource>,
    default_set: PropertySet,
    sets: HashMap<Locale, PropertySet>,
    active: Locale,
    encoder: Option<Encoder>,
    sweeper_threshold: usize,
    sweeper: Option<Sweeper>,
    sweeper_generation: u64,
}

impl Lang {
    /// Load `bundle` from `.properties` files in `bundle_dir`, starting on `locale`.
    ///
    /// Both the locale's bundle and the default bundle must load; otherwise
    /// no `Lang` is created.
    pub fn new(
        bundle: impl Into<String>,
        bundle_dir: impl Into<PathBuf>,
        locale: Locale,
    ) -> Result<Self> {
        Self::with_source(bundle, bundle_dir, locale, PropertiesFile::new())
    }

    /// Same as `new`, reading bundles through `source`
    pub fn with_source<S: PropertySource + 'static>(
        bundle: impl Into<String>,
        bundle_dir: impl Into<PathBuf>,
        locale: Locale,
        source: S,
    ) -> Result<Self> {
        let bundle = bundle.into();
        let bundle_dir = bundle_dir.into();
        let source: Box<dyn PropertySource> = Box::new(source);

        let initial_path = properties::resource_path(&bundle_dir, &bundle, &locale, source.extension());
        let initial_set = source.load(&initial_path)?;
        let default_path =
            properties::resource_path(&bundle_dir, &bundle, &Locale::NONE, source.extension());
        let default_set = source.load(&default_path)?;

        log::info!(
            "Loaded bundle '{}' from {} (locale {}, {} default keys)",
            bundle,
            bundle_dir.display(),
            locale,
            default_set.len()
        );

        let mut sets = HashMap::new();
        sets.insert(locale.clone(), initial_set);

        Ok(Self {
            bundle,
            bundle_dir,
            source,
            default_set,
            sets,
            active: locale,
            encoder: Some(Box::new(encoder::identity)),
            sweeper_threshold: 0,
            sweeper: None,
            sweeper_generation: 0,
        })
    }

    /// Build a `Lang` from a loaded configuration
    pub fn from_config(config: &LangConfig) -> Result<Self> {
        config.validate()?;
        let mut lang = Self::with_source(
            config.bundle.clone(),
            config.dir.clone(),
            config.locale.clone(),
            config.source()?,
        )?;
        lang.set_sweeper_threshold(config.sweeper_threshold);
        Ok(lang)
    }

    /// Install the sweeper.
    ///
    /// If no threshold was set yet, the threshold becomes
    /// `DEFAULT_SWEEPER_THRESHOLD` so the sweeper can actually fire.
    pub fn set_sweeper<F>(&mut self, sweeper: F)
    where
        F: FnMut(&mut Lang) + Send + 'static,
    {
        self.sweeper = Some(Box::new(sweeper));
        self.sweeper_generation += 1;
        if self.sweeper_threshold == 0 {
            self.sweeper_threshold = DEFAULT_SWEEPER_THRESHOLD;
        }
    }

    /// Remove the sweeper; the threshold is left as is
    pub fn clear_sweeper(&mut self) {
        self.sweeper = None;
        self.sweeper_generation += 1;
    }

    /// Whether a sweeper is installed
    pub fn has_sweeper(&self) -> bool {
        self.sweeper.is_some()
    }

    /// Set the cached-locale count at which the sweeper fires.
    /// Negative values are clamped to 0, which disables the sweeper.
    pub fn set_sweeper_threshold(&mut self, value: i64) {
        self.sweeper_threshold = if value < 0 {
            0
        } else {
            usize::try_from(value).unwrap_or(usize::MAX)
        };
    }

    /// Current sweeper threshold (0 = disabled)
    pub fn sweeper_threshold(&self) -> usize {
        self.sweeper_threshold
    }

    /// Drop every cached locale except the active one
    pub fn reset(&mut self) {
        let before = self.sets.len();
        let active = &self.active;
        self.sets.retain(|locale, _| locale == active);
        log::debug!(
            "Reset locale cache: {} -> {} locales",
            before,
            self.sets.len()
        );
    }

    /// Drop one cached locale. The active locale cannot be removed.
    pub fn remove_locale(&mut self, locale: &Locale) -> bool {
        if *locale == self.active {
            log::warn!("Refusing to evict active locale {}", locale);
            return false;
        }
        self.sets.remove(locale).is_some()
    }

    /// Number of locales that can be switched to without reading a file
    pub fn fast_switch_size(&self) -> usize {
        self.sets.len()
    }

    /// Locales that can be switched to without reading a file (unordered)
    pub fn fast_switch_locales(&self) -> Vec<Locale> {
        self.sets.keys().cloned().collect()
    }

    /// Translated value for `key`.
    ///
    /// Missing in the active locale falls back to the default bundle; missing
    /// in both yields an empty string. The encoder, if any, is applied either way.
    pub fn get(&self, key: &str) -> String {
        let value = match self.sets.get(&self.active).and_then(|set| set.get(key)) {
            Some(value) => value.to_string(),
            None => self.default_set.get_string(key),
        };
        self.encode(value)
    }

    /// Whether `key` resolves in the active or the default bundle
    pub fn has_key(&self, key: &str) -> bool {
        self.sets
            .get(&self.active)
            .map_or(false, |set| set.has_key(key))
            || self.default_set.has_key(key)
    }

    /// Every resolvable key with its encoded value
    pub fn get_all(&self) -> HashMap<String, String> {
        let mut merged: HashMap<&str, &str> = self.default_set.iter().collect();
        if let Some(set) = self.sets.get(&self.active) {
            merged.extend(set.iter());
        }
        merged
            .into_iter()
            .map(|(key, value)| (key.to_string(), self.encode(value.to_string())))
            .collect()
    }

    /// Apply `encoder` to every value returned by `get`
    pub fn set_encoder<F>(&mut self, encoder: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.encoder = Some(Box::new(encoder));
    }

    /// Return raw values from `get`
    pub fn clear_encoder(&mut self) {
        self.encoder = None;
    }

    /// Switch the active locale.
    ///
    /// A cached locale is selected without I/O. Otherwise its bundle is
    /// loaded first; on failure the cache and the active locale are left
    /// untouched and the load error is returned. Inserting a new locale may
    /// fire the sweeper.
    pub fn set_locale(&mut self, locale: impl Into<Locale>) -> Result<()> {
        let locale = locale.into();
        if self.sets.contains_key(&locale) {
            log::debug!("Fast switch to locale {}", locale);
            self.active = locale;
            return Ok(());
        }

        let path = self.resource_path(&locale);
        let set = self.source.load(&path).map_err(|e| {
            log::warn!("Failed to load locale {}: {}", locale, e);
            e
        })?;
        log::debug!(
            "Loaded locale {} ({} keys) from {}",
            locale,
            set.len(),
            path.display()
        );

        self.sets.insert(locale.clone(), set);
        self.active = locale;

        if self.sweeper_threshold > 0 && self.sets.len() >= self.sweeper_threshold {
            self.run_sweeper();
        }
        Ok(())
    }

    /// The active locale
    pub fn locale(&self) -> &Locale {
        &self.active
    }

    /// Bundle name, e.g. "message"
    pub fn bundle(&self) -> &str {
        &self.bundle
    }

    /// Directory the bundle files are read from
    pub fn bundle_dir(&self) -> &Path {
        &self.bundle_dir
    }

    /// Path the bundle for `locale` is read from
    pub fn resource_path(&self, locale: &Locale) -> PathBuf {
        properties::resource_path(&self.bundle_dir, &self.bundle, locale, self.source.extension())
    }

    fn encode(&self, value: String) -> String {
        match &self.encoder {
            Some(encoder) => encoder(&value),
            None => value,
        }
    }

    /// The sweeper is detached while it runs, so locale switches made from
    /// inside it do not re-enter it. A sweeper installed or cleared from
    /// inside it takes precedence over the one being run.
    fn run_sweeper(&mut self) {
        let Some(mut sweeper) = self.sweeper.take() else {
            return;
        };
        let generation = self.sweeper_generation;

        log::info!(
            "Locale cache reached {} entries (threshold {}), running sweeper",
            self.sets.len(),
            self.sweeper_threshold
        );
        sweeper(self);

        if self.sweeper_generation == generation {
            self.sweeper = Some(sweeper);
        }
    }
}

impl fmt::Debug for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locales = self.fast_switch_locales();
        locales.sort();
        f.debug_struct("Lang")
            .field("bundle", &self.bundle)
            .field("bundle_dir", &self.bundle_dir)
            .field("active", &self.active)
            .field("cached_locales", &locales)
            .field("default_keys", &self.default_set.len())
            .field("sweeper_threshold", &self.sweeper_threshold)
            .field("has_sweeper", &self.sweeper.is_some())
            .field("has_encoder", &self.encoder.is_some())
            .finish()
    }
}
