//! Internationalization: display labels for the greeting UI.
//!
//! Labels come from per-language JSON dictionaries loaded in the
//! background, then a built-in Korean table, then the key itself.
//! Supported languages: Korean (default), English, Japanese, Chinese,
//! Spanish, Portuguese, Indonesian, Turkish, German, French, Hindi, Russian.

mod fallback;
mod loader;
mod source;


use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;

use crate::error::{GreetingError, Result};

pub use fallback::FallbackTable;
pub use loader::DictionarySource;
pub use source::{Dictionary, LabelSource, resolve};

pub const SUPPORTED_LANGUAGES: [&str; 12] = [
    "ko", "en", "ja", "zh", "es", "pt", "id", "tr", "de", "fr", "hi", "ru",
];
pub const DEFAULT_LANGUAGE: &str = "ko";

pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Saved preference, then the locale's language part, then Korean.
pub fn detect_language(saved: Option<&str>, locale: Option<&str>) -> String {
    if let Some(saved) = saved.filter(|l| is_supported(l)) {
        return saved.to_string();
    }
    if let Some(locale) = locale {
        let lang = locale
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if is_supported(&lang) {
            return lang;
        }
    }
    DEFAULT_LANGUAGE.to_string()
}

/// Starting language: a supported forced code (CLI or config), else detection.
pub fn startup_language(forced: Option<&str>, saved: Option<&str>, locale: Option<&str>) -> String {
    if let Some(lang) = forced {
        if is_supported(lang) {
            return lang.to_string();
        }
        tracing::warn!(lang, "unsupported language requested, detecting instead");
    }
    detect_language(saved, locale)
}

/// First non-empty of `LC_ALL`, `LC_MESSAGES`, `LANG`.
pub fn env_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
enum Entry {
    Pending,
    Loaded(Arc<Dictionary>),
    Failed,
}

#[derive(Debug)]
struct Catalog {
    entries: HashMap<String, Entry>,
    current: String,
    // last language whose dictionary was actually shown
    displayed: Option<String>,
}

impl Catalog {
    fn dictionary(&self, lang: &str) -> Option<&Dictionary> {
        match self.entries.get(lang) {
            Some(Entry::Loaded(dict)) => Some(dict.as_ref()),
            _ => None,
        }
    }
}

/// Shared label catalog. Clones share the same cache and active language.
#[derive(Debug, Clone)]
pub struct I18n {
    catalog: Arc<Mutex<Catalog>>,
    source: DictionarySource,
    runtime: Handle,
}

impl I18n {
    pub fn new(source: DictionarySource, lang: &str, runtime: Handle) -> Self {
        let current = if is_supported(lang) { lang } else { DEFAULT_LANGUAGE };
        Self {
            catalog: Arc::new(Mutex::new(Catalog {
                entries: HashMap::new(),
                current: current.to_string(),
                displayed: None,
            })),
            source,
            runtime,
        }
    }

    fn catalog(&self) -> MutexGuard<'_, Catalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_language(&self) -> String {
        self.catalog().current.clone()
    }

    pub fn is_loaded(&self, lang: &str) -> bool {
        self.catalog().dictionary(lang).is_some()
    }

    /// Switches the active language and loads its dictionary in the background.
    ///
    /// Lookups keep using the previously shown dictionary until the load
    /// finishes. Unsupported codes leave everything unchanged.
    pub fn set_language(&self, lang: &str) -> Result<()> {
        if self.activate(lang)? {
            let this = self.clone();
            let lang = lang.to_string();
            self.runtime.spawn(async move {
                this.load(&lang).await;
            });
        }
        Ok(())
    }

    /// Like [`I18n::set_language`] but waits for the dictionary.
    pub async fn set_language_and_wait(&self, lang: &str) -> Result<()> {
        if self.activate(lang)? {
            self.load(lang).await;
        }
        Ok(())
    }

    /// Points `current` at `lang`; true when a fetch is needed.
    fn activate(&self, lang: &str) -> Result<bool> {
        if !is_supported(lang) {
            tracing::warn!(lang, "unsupported language");
            return Err(GreetingError::UnsupportedLanguage(lang.to_string()));
        }
        let mut catalog = self.catalog();
        catalog.current = lang.to_string();
        let entry = catalog.entries.get(lang).cloned();
        match entry {
            Some(Entry::Loaded(_)) => {
                catalog.displayed = Some(lang.to_string());
                Ok(false)
            }
            Some(Entry::Pending) => Ok(false),
            Some(Entry::Failed) | None => {
                catalog.entries.insert(lang.to_string(), Entry::Pending);
                Ok(true)
            }
        }
    }

    /// Fetches `lang`, falling back to loading the default language on failure.
    pub async fn load(&self, lang: &str) -> bool {
        if self.fetch_into(lang).await {
            return true;
        }
        if lang != DEFAULT_LANGUAGE && !self.is_loaded(DEFAULT_LANGUAGE) {
            self.fetch_into(DEFAULT_LANGUAGE).await;
        }
        false
    }

    async fn fetch_into(&self, lang: &str) -> bool {
        match self.source.fetch(lang).await {
            Ok(dict) => {
                let mut catalog = self.catalog();
                catalog
                    .entries
                    .insert(lang.to_string(), Entry::Loaded(Arc::new(dict)));
                if catalog.current == lang {
                    catalog.displayed = Some(lang.to_string());
                }
                tracing::info!(lang, "loaded dictionary");
                true
            }
            Err(e) => {
                tracing::warn!(lang, error = %e, "failed to load dictionary");
                self.catalog()
                    .entries
                    .insert(lang.to_string(), Entry::Failed);
                false
            }
        }
    }

    /// Display string for `key`.
    pub fn t(&self, key: &str) -> String {
        let catalog = self.catalog();
        let mut sources: Vec<&dyn LabelSource> = Vec::with_capacity(2);

        let active = match catalog.entries.get(&catalog.current) {
            Some(Entry::Loaded(dict)) => Some(dict.as_ref()),
            Some(Entry::Failed) => catalog.dictionary(DEFAULT_LANGUAGE),
            Some(Entry::Pending) | None => catalog
                .displayed
                .as_deref()
                .and_then(|lang| catalog.dictionary(lang))
                .or_else(|| catalog.dictionary(DEFAULT_LANGUAGE)),
        };
        if let Some(dict) = active {
            sources.push(dict);
        }
        sources.push(&FallbackTable);

        resolve(&sources, key)
    }
}
