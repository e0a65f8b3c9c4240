//! Configuration management for SocialFlow

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Settings for the content generation gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier sent to the generation API
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    /// The key itself never lives in the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Override for the API base URL (tests, proxies)
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP transport timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key_env: default_api_key_env(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GenerationConfig {
    /// Resolve the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| ConfigError::MissingField(self.api_key_env.clone()).into())
    }
}

/// Settings for the publishing provider
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// Simulated account-linking latency in milliseconds
    #[serde(default)]
    pub connect_delay_ms: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing config file is not an error; every field has a usable
    /// default and the API key is resolved from the environment.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self::default()
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("SOCIALFLOW_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("socialflow").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();

        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.generation.base_url, None);
        assert_eq!(config.generation.timeout_secs, 60);
        assert_eq!(config.provider.connect_delay_ms, 0);
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[generation]
model = "gemini-2.0-pro"
timeout_secs = 30

[provider]
connect_delay_ms = 1500
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.generation.model, "gemini-2.0-pro");
        assert_eq!(config.generation.timeout_secs, 30);
        // Unset fields fall back to defaults
        assert_eq!(config.generation.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.provider.connect_delay_ms, 1500);
    }

    #[test]
    fn test_load_from_path_empty_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.generation.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&config_path);
        assert!(matches!(
            result,
            Err(crate::SocialFlowError::Config(ConfigError::ReadError(_)))
        ));
    }

    #[test]
    fn test_load_from_path_malformed_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "not valid toml {{{").unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(
            result,
            Err(crate::SocialFlowError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_env_override() {
        std::env::set_var("SOCIALFLOW_CONFIG", "/tmp/custom-socialflow.toml");

        let path = resolve_config_path().unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom-socialflow.toml"));

        std::env::remove_var("SOCIALFLOW_CONFIG");
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_default() {
        std::env::remove_var("SOCIALFLOW_CONFIG");

        let path = resolve_config_path().unwrap();
        assert!(path.ends_with("socialflow/config.toml"));
    }

    #[test]
    #[serial]
    fn test_api_key_from_env() {
        std::env::set_var("SOCIALFLOW_TEST_KEY", "sk-test-123");

        let config = GenerationConfig {
            api_key_env: "SOCIALFLOW_TEST_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_key().unwrap(), "sk-test-123");

        std::env::remove_var("SOCIALFLOW_TEST_KEY");
    }

    #[test]
    #[serial]
    fn test_api_key_missing_env() {
        std::env::remove_var("SOCIALFLOW_ABSENT_KEY");

        let config = GenerationConfig {
            api_key_env: "SOCIALFLOW_ABSENT_KEY".to_string(),
            ..Default::default()
        };

        let result = config.api_key();
        match result {
            Err(crate::SocialFlowError::Config(ConfigError::MissingField(field))) => {
                assert_eq!(field, "SOCIALFLOW_ABSENT_KEY");
            }
            _ => panic!("Expected MissingField error"),
        }
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            generation: GenerationConfig {
                model: "gemini-2.5-flash".to_string(),
                api_key_env: "GEMINI_API_KEY".to_string(),
                base_url: Some("http://localhost:8080".to_string()),
                timeout_secs: 10,
            },
            provider: ProviderConfig {
                connect_delay_ms: 250,
            },
        };

        let toml_content = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_content).unwrap();

        assert_eq!(parsed.generation.model, config.generation.model);
        assert_eq!(parsed.generation.base_url, config.generation.base_url);
        assert_eq!(
            parsed.provider.connect_delay_ms,
            config.provider.connect_delay_ms
        );
    }
}
