use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CODILLA_GATEWAY_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::{CodillaError, CodillaResult};
use crate::structs::config::config::Config;

const SAMPLE_CONFIG: &str = r#"# Codilla streaming client configuration

[gateway]
# OpenAI-compatible endpoint; /chat/completions is appended
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"

# Environment variable holding the bearer token
api_key_env = "CODILLA_API_KEY"

# Upper bound for connecting and receiving response headers
request_timeout_secs = 120

# temperature = 0.7

[stream]
# Abandon a stream after this many seconds without data (0 = never)
idle_timeout_secs = 0

# Try to decode an unterminated final line when the connection closes
flush_trailing = false
"#;

pub struct ConfigManager;

impl ConfigManager {

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads the config at `path` (or the default location). A missing file
    /// yields defaults; `CODILLA_GATEWAY_URL` overrides the base URL.
    pub fn load(path: Option<&Path>) -> CodillaResult<Config> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        let mut config = if config_path.exists() {
            log::info!("📋 Loading config from: {}", config_path.display());
            Self::load_from(&config_path)?
        } else {
            if path.is_some() {
                return Err(CodillaError::ConfigurationFileError {
                    path: config_path.display().to_string(),
                    reason: "file does not exist".to_string(),
                });
            }
            log::debug!("No config at {}, using defaults", config_path.display());
            Config::default()
        };

        if let Ok(url) = std::env::var(CODILLA_GATEWAY_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("Gateway URL overridden by {}", CODILLA_GATEWAY_URL_ENV);
                config.gateway.base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> CodillaResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| CodillaError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn create_sample_config(path: Option<&Path>) -> CodillaResult<PathBuf> {
        let config_file_path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if config_file_path.exists() {
            return Err(CodillaError::ConfigurationFileError {
                path: config_file_path.display().to_string(),
                reason: "file already exists".to_string(),
            });
        }

        if let Some(dir) = config_file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&config_file_path, SAMPLE_CONFIG)?;
        log::info!("✅ Created sample config at: {}", config_file_path.display());
        Ok(config_file_path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let gateway = &config.gateway;

        let base_url = gateway.base_url.trim();
        if base_url.is_empty() {
            errors.push("gateway.base_url must not be empty".to_string());
        } else {
            match reqwest::Url::parse(base_url) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
                Ok(url) => errors.push(format!("gateway.base_url has unsupported scheme: {}", url.scheme())),
                Err(e) => errors.push(format!("gateway.base_url is not a valid URL: {}", e)),
            }
        }

        if gateway.model.trim().is_empty() {
            errors.push("gateway.model must not be empty".to_string());
        }

        if gateway.api_key_env.trim().is_empty() {
            errors.push("gateway.api_key_env must name an environment variable".to_string());
        }

        if gateway.request_timeout_secs == 0 {
            errors.push("gateway.request_timeout_secs must be greater than zero".to_string());
        }

        if let Some(temperature) = gateway.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                errors.push(format!("gateway.temperature must be between 0 and 2, got {}", temperature));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn resolve_api_key(config: &Config) -> CodillaResult<String> {
        let env_name = config.gateway.api_key_env.as_str();
        match std::env::var(env_name) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CodillaError::config_error(
                &format!("API key not found in ${}", env_name),
                Some("gateway.api_key_env"),
                Some(&format!("export {}=<your key>", env_name)),
            )),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn sample_config_round_trips_through_loader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = ConfigManager::create_sample_config(Some(&path)).unwrap();
        assert_eq!(written, path);

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_ok!(ConfigManager::validate_config(&config));
    }

    #[test]
    fn refuses_to_overwrite_existing_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            ConfigManager::create_sample_config(Some(&path)),
            Err(CodillaError::ConfigurationFileError { .. })
        ));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[stream]\nidle_timeout_secs = 30\nflush_trailing = true\n").unwrap();

        let config = ConfigManager::load_from(&path).unwrap();
        assert_eq!(config.stream.idle_timeout_secs, 30);
        assert!(config.stream.flush_trailing);
        assert_eq!(config.gateway.model, "gpt-4o-mini");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert_err!(ConfigManager::load(Some(&path)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nmodel = ").unwrap();

        assert!(matches!(
            ConfigManager::load_from(&path),
            Err(CodillaError::ParseError { .. })
        ));
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut config = Config::default();
        config.gateway.base_url = "ftp://example.com".to_string();
        config.gateway.model = " ".to_string();
        config.gateway.api_key_env = String::new();
        config.gateway.temperature = Some(3.5);

        let errors = ConfigManager::validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].contains("scheme"));
    }
}
