//! Runtime settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `ENRICHER__`-prefixed environment variables
//! (`ENRICHER__WORKERS=8`, `ENRICHER__TMDB__BASE_URL=...`).

use crate::enricher::{
    EnrichError, Result,
    manager::EnricherConfig,
    provider::{TmdbOptions, tmdb::TMDB_BASE_URL},
    types::RefreshPolicy,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the settings file
pub const CONFIG_PATH_ENV: &str = "ENRICHER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "enricher.toml";
/// Highest `TMDB_TOKEN_<n>` variable read from the environment
pub const MAX_ENV_TOKENS: usize = 16;

/// All settings of one run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub workers: usize,
    pub record_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub year_tolerance: u32,
    pub language: String,
    pub fallback_language: Option<String>,
    pub min_overview_len: usize,
    pub progress_log_every: u64,
    pub refresh: RefreshPolicy,
    /// Catalog read at startup
    pub input: PathBuf,
    /// Where the enriched catalog goes; defaults to `input`
    pub output: Option<PathBuf>,
    pub tmdb: TmdbSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let run = EnricherConfig::default();
        Self {
            workers: run.workers,
            record_delay_ms: 150,
            request_timeout_secs: 10,
            year_tolerance: run.year_tolerance,
            language: run.language,
            fallback_language: run.fallback_language,
            min_overview_len: run.min_overview_len,
            progress_log_every: run.progress_log_every,
            refresh: run.refresh,
            input: PathBuf::from("data/anilist_enriched.json"),
            output: None,
            tmdb: TmdbSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub base_url: String,
    /// Bearer tokens, merged with `TMDB_TOKEN_<n>` variables
    pub tokens: Vec<String>,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            base_url: TMDB_BASE_URL.to_string(),
            tokens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Filter used when `RUST_LOG` is unset
    pub filter: String,
    /// Also write logs to `<directory>/anime-enricher.log`
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            json: false,
            filter: "info".to_string(),
            directory: None,
        }
    }
}

impl Settings {
    /// Load from the file named by `ENRICHER_CONFIG` (or `enricher.toml`)
    /// and the environment
    pub fn load() -> Result<Self> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load from `path` (missing file is fine) and the environment
    pub fn load_from(path: &str) -> Result<Self> {
        let mut settings: Self = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("ENRICHER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| EnrichError::Config(e.to_string()))?;

        settings.tmdb.tokens.extend(env_tokens());
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EnrichError::Config("workers must be at least 1".to_string()));
        }
        if self.language.trim().is_empty() {
            return Err(EnrichError::Config("language must not be empty".to_string()));
        }
        Ok(())
    }

    /// Configured bearer tokens, blanks dropped
    #[must_use]
    pub fn tokens(&self) -> Vec<String> {
        self.tmdb
            .tokens
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    #[must_use]
    pub fn tmdb_options(&self) -> TmdbOptions {
        TmdbOptions {
            base_url: self.tmdb.base_url.clone(),
            language: self.language.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    #[must_use]
    pub fn enricher_config(&self) -> EnricherConfig {
        EnricherConfig {
            workers: self.workers,
            record_delay: Duration::from_millis(self.record_delay_ms),
            year_tolerance: self.year_tolerance,
            language: self.language.clone(),
            fallback_language: self.fallback_language.clone(),
            refresh: self.refresh,
            min_overview_len: self.min_overview_len,
            progress_log_every: self.progress_log_every,
        }
    }

    /// Output path, falling back to the input path
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.input.clone())
    }
}

fn env_tokens() -> Vec<String> {
    (1..=MAX_ENV_TOKENS)
        .filter_map(|n| std::env::var(format!("TMDB_TOKEN_{n}")).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        let run = settings.enricher_config();

        assert_eq!(run.workers, 4);
        assert_eq!(run.record_delay, Duration::from_millis(150));
        assert_eq!(run.year_tolerance, 1);
        assert_eq!(run.language, "pt-BR");
        assert_eq!(run.fallback_language.as_deref(), Some("en-US"));
        assert!(run.refresh.require_overview);
        assert!(!run.refresh.require_backdrop);
        assert_eq!(settings.output_path(), settings.input);
        assert_eq!(settings.tmdb_options().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
workers = 2
year_tolerance = 2
output = "out.json"

[refresh]
require_backdrop = true

[tmdb]
base_url = "http://localhost:9999"
tokens = ["a", " ", "b", "c", "d"]
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path().to_str().unwrap()).unwrap();

        assert_eq!(settings.workers, 2);
        assert_eq!(settings.year_tolerance, 2);
        assert_eq!(settings.output_path(), PathBuf::from("out.json"));
        assert!(settings.refresh.require_backdrop);
        assert!(settings.refresh.require_overview);
        assert_eq!(settings.tmdb.base_url, "http://localhost:9999");
        assert!(settings.tokens().starts_with(&["a".to_string(), "b".to_string()]));
        assert!(!settings.tokens().iter().any(|t| t.is_empty()));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load_from("/nonexistent/enricher.toml").unwrap();
        assert_eq!(settings.language, "pt-BR");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "workers = 0").unwrap();

        let err = Settings::load_from(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, EnrichError::Config(_)));
    }
}
