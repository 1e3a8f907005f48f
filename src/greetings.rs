use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{GreetingError, Result};

/// Pool shipped with the binary; a user file replaces it wholesale.
const BUILTIN_POOL: &str = include_str!("../data/greetings.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recipient {
    Parents,
    Grandparents,
    Boss,
    Colleague,
    Friend,
    Partner,
    Sns,
}

impl Recipient {
    pub const ALL: [Recipient; 7] = [
        Recipient::Parents,
        Recipient::Grandparents,
        Recipient::Boss,
        Recipient::Colleague,
        Recipient::Friend,
        Recipient::Partner,
        Recipient::Sns,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Recipient::Parents => "parents",
            Recipient::Grandparents => "grandparents",
            Recipient::Boss => "boss",
            Recipient::Colleague => "colleague",
            Recipient::Friend => "friend",
            Recipient::Partner => "partner",
            Recipient::Sns => "sns",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Recipient::Parents => "👨‍👩‍👧",
            Recipient::Grandparents => "👴👵",
            Recipient::Boss => "👔",
            Recipient::Colleague => "🤝",
            Recipient::Friend => "🎉",
            Recipient::Partner => "💕",
            Recipient::Sns => "📱",
        }
    }

    /// Label key, e.g. `recipient.parents`.
    pub fn label_key(self) -> String {
        format!("recipient.{}", self.as_str())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recipient {
    type Err = GreetingError;

    fn from_str(s: &str) -> Result<Self> {
        Recipient::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| GreetingError::UnknownRecipient(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
    Funny,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::Casual, Tone::Funny];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Funny => "funny",
        }
    }

    pub fn label_key(self) -> String {
        format!("tone.{}", self.as_str())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = GreetingError;

    fn from_str(s: &str) -> Result<Self> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GreetingError::UnknownTone(s.to_string()))
    }
}

/// Key under which used indices are tracked, e.g. `parents_formal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolKey(String);

impl PoolKey {
    pub fn new(recipient: Recipient, tone: Tone) -> Self {
        PoolKey(format!("{}_{}", recipient.as_str(), tone.as_str()))
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable greeting data, keyed by recipient then tone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct GreetingPool {
    pools: HashMap<Recipient, HashMap<Tone, Vec<String>>>,
}

impl GreetingPool {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_POOL)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Loads `path` when given, the built-in pool otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let pool = Self::from_file(p)?;
                tracing::info!(path = %p.display(), "loaded greeting pool from file");
                Ok(pool)
            }
            None => Self::builtin(),
        }
    }

    /// Empty slice when the pair is absent.
    pub fn pool(&self, recipient: Recipient, tone: Tone) -> &[String] {
        self.pools
            .get(&recipient)
            .and_then(|tones| tones.get(&tone))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
