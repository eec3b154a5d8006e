use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_PORT: u16 = 8081;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_KEY environment variable not set")]
    MissingApiKey,
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid inference config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceSettings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl InferenceSettings {
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// A missing file means defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!(
                "No inference config at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents)
    }
}

/// Everything the server needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub port: u16,
    pub frontend_dir: String,
    pub inference: InferenceSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|key| !key.trim().is_empty());
        let api_key = non_blank("API_KEY")
            .or_else(|| non_blank("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let manifest_dir = lookup("CARGO_MANIFEST_DIR");
        let frontend_dir = lookup("FRONTEND_DIR").unwrap_or_else(|| match &manifest_dir {
            Some(dir) => format!("{}/../frontend/dist", dir),
            None => "/usr/src/app/frontend/dist".to_string(),
        });

        let config_path = lookup("INFERENCE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| match &manifest_dir {
                Some(dir) => Path::new(dir).join("config/inference.yaml"),
                None => PathBuf::from("config/inference.yaml"),
            });
        let mut inference = InferenceSettings::load(&config_path)?;

        if let Some(model) = lookup("GEMINI_MODEL") {
            inference.model = model;
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            inference.base_url = base_url;
        }

        Ok(Self {
            api_key,
            port,
            frontend_dir,
            inference,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_a_startup_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "9000")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = AppConfig::from_lookup(lookup_from(&[("API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_KEY", "secret"),
            ("INFERENCE_CONFIG", "/nonexistent/inference.yaml"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.port, 8081);
        assert_eq!(config.bind_address(), "0.0.0.0:8081");
        assert_eq!(config.inference, InferenceSettings::default());
    }

    #[test]
    fn gemini_api_key_alias_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "alias"),
            ("PORT", "9090"),
            ("FRONTEND_DIR", "/srv/dist"),
            ("INFERENCE_CONFIG", "/nonexistent/inference.yaml"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:9999"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "alias");
        assert_eq!(config.port, 9090);
        assert_eq!(config.frontend_dir, "/srv/dist");
        assert_eq!(config.inference.model, "gemini-2.5-pro");
        assert_eq!(config.inference.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn blank_api_key_falls_back_to_the_alias() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("API_KEY", ""),
            ("GEMINI_API_KEY", "real"),
            ("INFERENCE_CONFIG", "/nonexistent/inference.yaml"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "real");
    }

    #[test]
    fn bad_port_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[("API_KEY", "k"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "eighty"));
    }

    #[test]
    fn yaml_settings_fill_missing_fields_with_defaults() {
        let settings = InferenceSettings::from_yaml("model: gemini-2.0-flash\n").unwrap();
        assert_eq!(settings.model, "gemini-2.0-flash");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);

        assert!(InferenceSettings::from_yaml("model: [unclosed").is_err());
    }

    #[test]
    fn bundled_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/inference.yaml");
        let settings = InferenceSettings::load(&path).unwrap();
        assert_eq!(settings.model, DEFAULT_MODEL);
    }
}
