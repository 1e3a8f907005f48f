//! Fetching language files from disk or over HTTP.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;

use super::source::Dictionary;
use crate::error::Result;

// Shipped dictionaries, used when the configured directory lacks a file.
const BUILTIN_DICTIONARIES: [(&str, &str); 3] = [
    ("ko", include_str!("../../locales/ko.json")),
    ("en", include_str!("../../locales/en.json")),
    ("ja", include_str!("../../locales/ja.json")),
];

fn builtin(lang: &str) -> Option<&'static str> {
    BUILTIN_DICTIONARIES
        .iter()
        .find(|(code, _)| *code == lang)
        .map(|(_, raw)| *raw)
}

/// Where `<lang>.json` files live.
#[derive(Debug, Clone)]
pub enum DictionarySource {
    Directory(PathBuf),
    Http { base: String, client: reqwest::Client },
}

impl DictionarySource {
    /// `http://` and `https://` locations are fetched, anything else is a directory.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DictionarySource::Http {
                base: location.trim_end_matches('/').to_string(),
                client: reqwest::Client::new(),
            }
        } else {
            let expanded = shellexpand::tilde(location);
            DictionarySource::Directory(PathBuf::from(expanded.as_ref()))
        }
    }

    pub async fn fetch(&self, lang: &str) -> Result<Dictionary> {
        match self {
            DictionarySource::Directory(dir) => {
                let path = dir.join(format!("{lang}.json"));
                match tokio::fs::read_to_string(&path).await {
                    Ok(raw) => Dictionary::from_json(lang, &raw),
                    Err(e) if e.kind() == ErrorKind::NotFound => match builtin(lang) {
                        Some(raw) => {
                            tracing::debug!(lang, path = %path.display(), "using built-in dictionary");
                            Dictionary::from_json(lang, raw)
                        }
                        None => Err(e.into()),
                    },
                    Err(e) => Err(e.into()),
                }
            }
            DictionarySource::Http { base, client } => {
                let url = format!("{base}/{lang}.json");
                let value: Value = client
                    .get(&url)
                    .send()
                    .await?
                    .error_for_status()?
                    .json()
                    .await?;
                Dictionary::from_value(lang, value)
            }
        }
    }
}
