use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project defaults, compiled in so a missing file never breaks startup.
const BLUEPRINT: &str = include_str!("../seollal.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub lang: Option<String>,
    pub greetings_path: Option<String>,
    pub locales: String,
    pub data_dir: Option<String>,
    pub share_command: Option<String>,
    pub toast_ms: u64,
    pub copied_badge_ms: u64,
}

impl Settings {
    /// Layers: blueprint, user config, `./seollal.toml`, `SEOLLAL_*` env.
    pub fn new(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::from_str(BLUEPRINT, FileFormat::Toml));

        if let Some(user_config_path) = get_user_config_path() {
            ensure_user_config(&user_config_path);
            builder = builder.add_source(File::from(user_config_path).required(false));
        }

        builder = builder.add_source(File::with_name("seollal.toml").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder
            .add_source(Environment::with_prefix("SEOLLAL"))
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults only.
    #[cfg(test)]
    pub fn blueprint() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(BLUEPRINT, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => expand(dir),
            None => dirs::data_dir()
                .map(|d| d.join("seollal"))
                .unwrap_or_else(|| PathBuf::from(".seollal")),
        }
    }

    pub fn greetings_path(&self) -> Option<PathBuf> {
        self.greetings_path.as_deref().map(expand)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn copied_badge_duration(&self) -> Duration {
        Duration::from_millis(self.copied_badge_ms)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("seollal");
    path.push("seollal.toml");
    Some(path)
}

// First run: seed the user config from the blueprint. Failing to write it is not fatal.
fn ensure_user_config(path: &Path) {
    if path.exists() {
        return;
    }
    let written = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(path, BLUEPRINT));
    if let Err(e) = written {
        tracing::debug!(path = %path.display(), error = %e, "could not seed user config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blueprint_defaults() {
        let s = Settings::blueprint().unwrap();
        assert_eq!(s.locales, "locales");
        assert_eq!(s.toast_duration(), Duration::from_millis(2500));
        assert_eq!(s.copied_badge_duration(), Duration::from_millis(2000));
        assert!(s.lang.is_none());
        assert!(s.share_command.is_none());
        assert!(s.greetings_path().is_none());
    }

    #[test]
    fn explicit_data_dir_wins() {
        let mut s = Settings::blueprint().unwrap();
        s.data_dir = Some("/tmp/seollal-test".into());
        assert_eq!(s.data_dir(), PathBuf::from("/tmp/seollal-test"));
    }

    #[test]
    fn file_overrides_blueprint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "lang = \"en\"\ntoast_ms = 900\n").unwrap();

        let s: Settings = Config::builder()
            .add_source(File::from_str(BLUEPRINT, FileFormat::Toml))
            .add_source(File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(s.lang.as_deref(), Some("en"));
        assert_eq!(s.toast_ms, 900);
        assert_eq!(s.copied_badge_ms, 2000);
    }
}
