//! Label sources and the resolution chain.

use serde_json::{Map, Value};

use crate::error::{GreetingError, Result};

/// Something that may know a display string for a dotted key.
pub trait LabelSource {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// A parsed language file: nested objects with string leaves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    root: Map<String, Value>,
}

impl Dictionary {
    pub fn from_value(lang: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(GreetingError::Dictionary {
                lang: lang.to_string(),
                reason: format!("expected a JSON object, got {}", kind(&other)),
            }),
        }
    }

    pub fn from_json(lang: &str, raw: &str) -> Result<Self> {
        Self::from_value(lang, serde_json::from_str(raw)?)
    }
}

impl LabelSource for Dictionary {
    fn lookup(&self, key: &str) -> Option<String> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.root.get(first)?;
        for segment in segments {
            node = node.as_object()?.get(segment)?;
        }
        // objects and empty strings do not count as a label
        match node {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Tries each source in order; the key itself when none knows it.
pub fn resolve(sources: &[&dyn LabelSource], key: &str) -> String {
    sources
        .iter()
        .find_map(|source| source.lookup(key))
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::fallback::FallbackTable;

    fn en() -> Dictionary {
        Dictionary::from_json(
            "en",
            r#"{
                "tone": {"funny": "Funny", "formal": "Formal"},
                "button": {"copy": "Copy", "share": ""},
                "intro": {"title": {"main": "Happy New Year"}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn dotted_lookup_descends() {
        let dict = en();
        assert_eq!(dict.lookup("tone.funny").as_deref(), Some("Funny"));
        assert_eq!(dict.lookup("intro.title.main").as_deref(), Some("Happy New Year"));
        assert!(dict.lookup("tone.casual").is_none());
        assert!(dict.lookup("tone.funny.extra").is_none());
        assert!(dict.lookup("missing").is_none());
    }

    #[test]
    fn object_and_empty_leaves_fall_through() {
        let dict = en();
        assert!(dict.lookup("intro.title").is_none());
        assert!(dict.lookup("button.share").is_none());
    }

    #[test]
    fn chain_prefers_earlier_sources() {
        let dict = en();
        let table = FallbackTable;
        assert_eq!(resolve(&[&dict, &table], "tone.funny"), "Funny");
        assert_eq!(resolve(&[&dict, &table], "tone.casual"), "반말");
        assert_eq!(resolve(&[&table], "tone.funny"), "재미있는");
    }

    #[test]
    fn unknown_key_comes_back_verbatim() {
        let dict = en();
        assert_eq!(resolve(&[&dict, &FallbackTable], "nothing.here"), "nothing.here");
        assert_eq!(resolve(&[], "tone.funny"), "tone.funny");
    }

    #[test]
    fn non_object_file_is_rejected() {
        assert!(matches!(
            Dictionary::from_json("en", "[1, 2]"),
            Err(GreetingError::Dictionary { .. })
        ));
    }
}
