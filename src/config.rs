//! Configuration loading for the `heimdall` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.heimdall/config.toml` (user)
//! 3. `/etc/heimdall/config.toml` (system)
//!
//! Every setting is optional; without any file the library defaults apply.
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.heimdall/secrets.toml` (user, must be 0600)
//! 2. `/etc/heimdall/secrets.toml` (system, must be 0600)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::gate::GateConfig;
use crate::providers::GeminiConfig;
use crate::{HeimdallBuilder, HeimdallError, Result};

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSection,
    /// Overrides for the career-chat gate.
    #[serde(default)]
    pub chat: GateOverrides,
    /// Overrides for the shared tools gate.
    #[serde(default)]
    pub tools: GateOverrides,
    /// Overrides for the interview pacing gate.
    #[serde(default)]
    pub interview: GateOverrides,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Gemini client settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub base_url: Option<String>,
}

/// Partial [`GateConfig`]; unset fields keep the preset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateOverrides {
    pub min_interval_secs: Option<u64>,
    pub max_calls_per_window: Option<usize>,
    pub window_secs: Option<u64>,
}

/// Cache capacities.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    pub chat_max_entries: Option<usize>,
    pub tools_max_entries: Option<usize>,
}

impl GateOverrides {
    /// Apply the overrides on top of `base`.
    pub fn apply(&self, mut base: GateConfig) -> GateConfig {
        if let Some(secs) = self.min_interval_secs {
            base = base.min_interval(Duration::from_secs(secs));
        }
        if let Some(n) = self.max_calls_per_window {
            base = base.max_per_window(n);
        }
        if let Some(secs) = self.window_secs {
            base = base.window(Duration::from_secs(secs));
        }
        base
    }
}

impl ProviderSection {
    pub fn gemini_config(&self) -> GeminiConfig {
        let mut config = GeminiConfig::default();
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        config.temperature = self.temperature;
        config.max_output_tokens = self.max_output_tokens;
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        config
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided; must exist)
    /// 2. `~/.heimdall/config.toml`
    /// 3. `/etc/heimdall/config.toml`
    ///
    /// Returns the defaults when no standard file exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HeimdallError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            HeimdallError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(HeimdallError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".heimdall").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/heimdall/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Apply every configured setting to an assistant builder.
    pub fn apply(&self, builder: HeimdallBuilder) -> HeimdallBuilder {
        let mut chat_cache = CacheConfig::chat();
        if let Some(n) = self.cache.chat_max_entries {
            chat_cache = chat_cache.max_entries(n);
        }
        let mut tools_cache = CacheConfig::default();
        if let Some(n) = self.cache.tools_max_entries {
            tools_cache = tools_cache.max_entries(n);
        }

        builder
            .gemini_config(self.provider.gemini_config())
            .chat_gate(self.chat.apply(GateConfig::chat()))
            .tools_gate(self.tools.apply(GateConfig::default()))
            .interview_gate(self.interview.apply(GateConfig::interview()))
            .chat_cache(chat_cache)
            .tools_cache(tools_cache)
    }
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub gemini: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

/// Environment variables consulted, in order, when no secrets file has a key.
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Returns empty secrets if no file exists (the key may come from the
    /// environment).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".heimdall").join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_from_file(&user_secrets);
            }
        }

        let system_secrets = PathBuf::from("/etc/heimdall/secrets.toml");
        if system_secrets.exists() {
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load a secrets file after checking its permissions.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            HeimdallError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            HeimdallError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            HeimdallError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(HeimdallError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Gemini API key, falling back to the environment.
    pub fn api_key(&self) -> Option<String> {
        self.gemini
            .as_ref()
            .map(|s| s.api_key.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|k| !k.trim().is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_keeps_presets() {
        let config: Config = toml::from_str("").unwrap();
        let chat = config.chat.apply(GateConfig::chat());
        assert_eq!(chat.min_interval, Duration::from_secs(5));
        assert_eq!(chat.max_per_window, 10);
        assert_eq!(config.provider.gemini_config().model, "gemini-1.5-flash-8b");
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [provider]
            model = "gemini-2.0-flash"
            temperature = 0.3
            request_timeout_secs = 10

            [chat]
            min_interval_secs = 2

            [tools]
            max_calls_per_window = 3
            window_secs = 120

            [interview]
            min_interval_secs = 3

            [cache]
            chat_max_entries = 50
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let gemini = config.provider.gemini_config();
        assert_eq!(gemini.model, "gemini-2.0-flash");
        assert_eq!(gemini.temperature, Some(0.3));
        assert_eq!(gemini.request_timeout, Duration::from_secs(10));

        let chat = config.chat.apply(GateConfig::chat());
        assert_eq!(chat.min_interval, Duration::from_secs(2));
        assert_eq!(chat.max_per_window, 10);

        let tools = config.tools.apply(GateConfig::default());
        assert_eq!(tools.min_interval, Duration::from_secs(10));
        assert_eq!(tools.max_per_window, 3);
        assert_eq!(tools.window, Duration::from_secs(120));

        let interview = config.interview.apply(GateConfig::interview());
        assert_eq!(interview.min_interval, Duration::from_secs(3));
        assert_eq!(interview.max_per_window, 10);

        assert_eq!(config.cache.chat_max_entries, Some(50));
        assert_eq!(config.cache.tools_max_entries, None);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("[chat]\nmin_interval = 2").is_err());
    }

    #[test]
    fn config_not_found_returns_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tools]\nmin_interval_secs = 1").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.tools.min_interval_secs, Some(1));
    }

    #[test]
    fn parse_secrets() {
        let secrets: Secrets = toml::from_str("[gemini]\napi_key = \"AIza-test\"").unwrap();
        assert_eq!(secrets.api_key(), Some("AIza-test".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn secrets_permissions_enforced() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gemini]\napi_key = \"AIza-test\"").unwrap();

        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).unwrap();
        let err = Secrets::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("insecure permissions"));

        fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600)).unwrap();
        let secrets = Secrets::load_from_file(file.path()).unwrap();
        assert_eq!(secrets.gemini.unwrap().api_key, "AIza-test");
    }
}
