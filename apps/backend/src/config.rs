//! Server configuration from the environment

use anyhow::{bail, Context};
use std::path::PathBuf;
use wordwise_core::DEFAULT_LANGUAGES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub vocabulary_dir: PathBuf,
    pub languages: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_path: "wordwise.db".to_string(),
            vocabulary_dir: PathBuf::from("."),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => defaults.port,
        };

        let languages = match lookup("LANGUAGES") {
            Some(raw) => parse_languages(&raw),
            None => defaults.languages,
        };
        if languages.is_empty() {
            bail!("LANGUAGES must name at least one language");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),
            vocabulary_dir: lookup("VOCABULARY_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.vocabulary_dir),
            languages,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_languages(raw: &str) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for language in raw.split(',').map(|l| l.trim().to_lowercase()) {
        if !language.is_empty() && !languages.contains(&language) {
            languages.push(language);
        }
    }
    languages
}
