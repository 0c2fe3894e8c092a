use std::env;
use std::str::FromStr;

use crate::errors::{DeckError, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_SLIDE_COUNT: u32 = 6;
pub const DEFAULT_MAX_SLIDE_COUNT: u32 = 10;
pub const DEFAULT_EXPORT_EXTENSION: &str = "pptx";

/// Runtime settings for the deck controller and the backend client.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckConfig {
    /// Base URL of the generation backend, without a trailing slash.
    pub api_base_url: String,
    /// Slide count suggested when the user has not chosen one.
    pub default_slide_count: u32,
    /// Requests for more slides are clamped to this value.
    pub max_slide_count: u32,
    /// File extension of exported presentations.
    pub export_extension: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_slide_count: DEFAULT_SLIDE_COUNT,
            max_slide_count: DEFAULT_MAX_SLIDE_COUNT,
            export_extension: DEFAULT_EXPORT_EXTENSION.to_string(),
        }
    }
}

impl DeckConfig {
    /// Reads settings from the environment, keeping defaults for unset variables.
    ///
    /// * `DECKGEN_API_URL`
    /// * `DECKGEN_SLIDE_COUNT`
    /// * `DECKGEN_MAX_SLIDES`
    /// * `DECKGEN_EXPORT_EXT`
    ///
    /// Call `dotenvy::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, env::VarError>,
    {
        let mut config = Self::default();

        if let Some(url) = read_var(&lookup, "DECKGEN_API_URL")? {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(count) = parse_var(&lookup, "DECKGEN_SLIDE_COUNT")? {
            config.default_slide_count = count;
        }
        if let Some(max) = parse_var(&lookup, "DECKGEN_MAX_SLIDES")? {
            config.max_slide_count = max;
        }
        if let Some(ext) = read_var(&lookup, "DECKGEN_EXPORT_EXT")? {
            config.export_extension = ext.trim_start_matches('.').to_string();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(DeckError::Config("API base URL cannot be empty".to_string()));
        }
        if self.max_slide_count == 0 {
            return Err(DeckError::Config(
                "maximum slide count must be at least 1".to_string(),
            ));
        }
        if self.default_slide_count == 0 || self.default_slide_count > self.max_slide_count {
            return Err(DeckError::Config(format!(
                "default slide count {} must be between 1 and {}",
                self.default_slide_count, self.max_slide_count
            )));
        }
        if self.export_extension.is_empty() {
            return Err(DeckError::Config("export extension cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Returns `Ok(None)` for unset or blank variables.
fn read_var<F>(lookup: &F, key: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> std::result::Result<String, env::VarError>,
{
    match lookup(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(DeckError::EnvVar(e)),
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> std::result::Result<String, env::VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match read_var(lookup, key)? {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| DeckError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> std::result::Result<String, env::VarError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = DeckConfig::from_lookup(source(&[])).unwrap();
        assert_eq!(config, DeckConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.max_slide_count, 10);
    }

    #[test]
    fn reads_and_cleans_values() {
        let config = DeckConfig::from_lookup(source(&[
            ("DECKGEN_API_URL", "https://decks.example.com/"),
            ("DECKGEN_SLIDE_COUNT", "4"),
            ("DECKGEN_MAX_SLIDES", " 12 "),
            ("DECKGEN_EXPORT_EXT", ".odp"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://decks.example.com");
        assert_eq!(config.default_slide_count, 4);
        assert_eq!(config.max_slide_count, 12);
        assert_eq!(config.export_extension, "odp");
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let err = DeckConfig::from_lookup(source(&[("DECKGEN_MAX_SLIDES", "lots")])).unwrap_err();
        assert!(matches!(err, DeckError::Config(ref msg) if msg.contains("DECKGEN_MAX_SLIDES")));
    }

    #[test]
    fn rejects_default_above_maximum() {
        let err = DeckConfig::from_lookup(source(&[
            ("DECKGEN_SLIDE_COUNT", "8"),
            ("DECKGEN_MAX_SLIDES", "5"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DeckError::Config(_)));
    }
}
