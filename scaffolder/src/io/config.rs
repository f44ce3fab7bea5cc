//! Scaffolder configuration: `scaffolder.toml` plus the `API_KEY` credential.
//!
//! The credential may come from the process environment or from a `.env` file
//! in the working directory (or one of its parents). Variables already set in
//! the environment win over `.env` entries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "scaffolder.toml";

/// Environment variable holding the backend credential.
pub const API_KEY_ENV: &str = "API_KEY";

/// On-disk configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults
/// below, so an absent file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub generation: GenerationConfig,
    pub backend: BackendConfig,
}

/// Parameters of the generation request and where the result lands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier sent with every request.
    pub model: String,

    /// Language the folder names should be written in.
    pub language: String,

    /// Nesting depth (excluding the root) the model is asked to reach.
    pub max_depth: u32,

    /// Upper bound on generated tokens. Billed by the backend.
    pub max_output_tokens: u32,

    /// Sampling temperature in `[0, 1]`.
    pub temperature: f32,

    pub presence_penalty: f32,

    /// Directory under which accepted proposals are created.
    pub base_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub api_base: String,

    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            language: "English".to_string(),
            max_depth: 5,
            max_output_tokens: 3200,
            temperature: 0.1,
            presence_penalty: 0.2,
            base_path: PathBuf::from("./example_folder_structures"),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ConfigFile {
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;
        if generation.model.trim().is_empty() {
            return Err(anyhow!("generation.model must be non-empty"));
        }
        if generation.language.trim().is_empty() {
            return Err(anyhow!("generation.language must be non-empty"));
        }
        if generation.max_depth == 0 {
            return Err(anyhow!("generation.max_depth must be >= 1"));
        }
        if generation.max_output_tokens == 0 {
            return Err(anyhow!("generation.max_output_tokens must be > 0"));
        }
        if !(0.0..=1.0).contains(&generation.temperature) {
            return Err(anyhow!("generation.temperature must be within [0, 1]"));
        }
        if !(-2.0..=2.0).contains(&generation.presence_penalty) {
            return Err(anyhow!("generation.presence_penalty must be within [-2, 2]"));
        }
        if generation.base_path.as_os_str().is_empty() {
            return Err(anyhow!("generation.base_path must be non-empty"));
        }
        if self.backend.api_base.trim().is_empty() {
            return Err(anyhow!("backend.api_base must be non-empty"));
        }
        if self.backend.timeout_secs == 0 {
            return Err(anyhow!("backend.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ConfigFile::default()`.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        debug!(path = %path.display(), "config file missing, using defaults");
        let cfg = ConfigFile::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ConfigFile =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Process-wide configuration, built once at startup and passed by reference.
#[derive(Debug)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub backend: BackendConfig,
    /// Backend credential. Absence is not an error here; the backend rejects
    /// the request instead.
    pub api_key: Option<SecretString>,
}

impl AppConfig {
    /// Read `path` (defaults when missing) and the `API_KEY` variable, after
    /// merging any `.env` file into the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let file = load_config(path)?;
        match dotenvy::dotenv() {
            Ok(env_path) => debug!(path = %env_path.display(), "loaded .env"),
            Err(err) if err.not_found() => debug!("no .env file found"),
            Err(err) => warn!(error = %err, "ignoring unreadable .env file"),
        }
        Ok(Self::new(file, std::env::var(API_KEY_ENV).ok()))
    }

    /// Assemble from an already validated file and a raw credential.
    pub fn new(file: ConfigFile, api_key: Option<String>) -> Self {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(SecretString::from);
        debug!(has_api_key = api_key.is_some(), "credential loaded");
        Self {
            generation: file.generation,
            backend: file.backend,
            api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ConfigFile::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("scaffolder.toml");
        fs::write(
            &path,
            "[generation]\nlanguage = \"German\"\nmax_depth = 3\n\n[backend]\ntimeout_secs = 10\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.generation.language, "German");
        assert_eq!(cfg.generation.max_depth, 3);
        assert_eq!(cfg.generation.model, "gpt-4o-mini");
        assert_eq!(cfg.backend.timeout_secs, 10);
        assert_eq!(cfg.backend.api_base, BackendConfig::default().api_base);
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("scaffolder.toml");
        fs::write(&path, "[generation]\ntemperature = 1.5\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("temperature"));
    }

    #[test]
    fn rejects_zero_depth() {
        let mut cfg = ConfigFile::default();
        cfg.generation.max_depth = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn blank_credential_counts_as_absent() {
        let config = AppConfig::new(ConfigFile::default(), Some("  ".to_string()));
        assert!(config.api_key.is_none());

        let config = AppConfig::new(ConfigFile::default(), Some("sk-test\n".to_string()));
        let key = config.api_key.as_ref().expect("key");
        assert_eq!(key.expose_secret(), "sk-test");
    }

    #[test]
    fn debug_output_redacts_credential() {
        let config = AppConfig::new(ConfigFile::default(), Some("sk-very-secret".to_string()));
        assert!(!format!("{config:?}").contains("sk-very-secret"));
    }
}
