use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use openmeteo_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf};

/// CLI settings stored on disk.
///
/// Example TOML:
/// base_url = "https://customer-api.open-meteo.com"
/// api_key = "..."
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Overrides the public Open-Meteo origin when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Commercial API key; the free tier works without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Settings {
    /// Load settings from disk, or return an empty default if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no settings file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Save settings to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "open-meteo", "openmeteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }

    /// Blank strings from the interactive prompt clear the setting.
    pub fn update(&mut self, base_url: &str, api_key: &str) {
        self.base_url = non_blank(base_url);
        self.api_key = non_blank(api_key);
    }

    /// Library configuration with these settings laid over the defaults.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key.clone());
        }
        config
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmeteo_core::DEFAULT_BASE_URL;

    #[test]
    fn empty_settings_use_library_defaults() {
        let cfg = Settings::default().client_config();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn settings_override_base_url_and_key() {
        let settings = Settings {
            base_url: Some("http://localhost:8080".into()),
            api_key: Some("KEY".into()),
        };
        let cfg = settings.client_config();

        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn update_trims_and_clears_blank_values() {
        let mut settings = Settings {
            base_url: Some("http://old".into()),
            api_key: Some("OLD".into()),
        };

        settings.update("  https://customer-api.open-meteo.com ", "   ");

        assert_eq!(
            settings.base_url.as_deref(),
            Some("https://customer-api.open-meteo.com")
        );
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn toml_roundtrip_omits_unset_fields() {
        let settings = Settings {
            base_url: None,
            api_key: Some("KEY".into()),
        };

        let text = toml::to_string_pretty(&settings).unwrap();
        assert!(!text.contains("base_url"));

        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let settings = Settings {
            base_url: Some("http://localhost:8080".into()),
            api_key: Some("TOP_SECRET".into()),
        };
        let dbg = format!("{settings:?}");

        assert!(!dbg.contains("TOP_SECRET"));
        assert!(dbg.contains("<redacted>"));
        assert!(dbg.contains("http://localhost:8080"));
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let path = std::env::temp_dir().join("openmeteo-cli-does-not-exist/settings.toml");
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("openmeteo-cli-test-{}", std::process::id()));
        let path = dir.join("settings.toml");
        let settings = Settings {
            base_url: Some("http://127.0.0.1:9000".into()),
            api_key: None,
        };

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded, settings);
    }
}
