use crate::api::constants;
use crate::models::CurrentUser;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_URL: &str = "PCO_ADMIN_API_URL";
pub const ENV_API_TOKEN: &str = "PCO_ADMIN_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    pub current_user: Option<CurrentUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_report_timeout")]
    pub report_timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_request_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT.as_secs()
}

fn default_report_timeout() -> u64 {
    constants::REPORT_TIMEOUT.as_secs()
}

fn default_page_size() -> u64 {
    25
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            report_timeout_secs: default_report_timeout(),
            page_size: default_page_size(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs.max(1))
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("pco-admin")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".pco-admin")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, then let `.env` and the process environment
    /// override the connection settings
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            debug!("API URL overridden from {}", ENV_API_URL);
            self.api_url = Some(url);
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            debug!("API token overridden from {}", ENV_API_TOKEN);
            self.api_token = Some(token);
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn api_url(&self) -> Result<&str> {
        self.api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .with_context(|| {
                format!(
                    "No API URL configured. Run 'pco-admin config set-url <url>' or set {}",
                    ENV_API_URL
                )
            })
    }

    pub fn set_api_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("API URL must start with http:// or https://");
        }
        info!("Setting API URL to: {}", url);
        self.api_url = Some(url.to_string());
        self.save()
    }

    pub fn set_api_token(&mut self, token: Option<String>) -> Result<()> {
        info!("{} API token", if token.is_some() { "Setting" } else { "Clearing" });
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self.save()
    }

    pub fn set_current_user(&mut self, user: CurrentUser) -> Result<()> {
        info!("Setting current user to: {} ({})", user.name, user.id);
        self.current_user = Some(user);
        self.save()
    }

    pub fn update_page_size(&mut self, page_size: u64) -> Result<()> {
        if page_size == 0 {
            anyhow::bail!("Page size must be at least 1");
        }
        info!("Updating page size to: {}", page_size);
        self.settings.page_size = page_size;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    #[test]
    fn test_defaults_fill_missing_settings() {
        let config = Config::from_toml("api_url = \"https://pest.example.com/api\"\n").unwrap();
        assert_eq!(config.api_url().unwrap(), "https://pest.example.com/api");
        assert_eq!(config.settings.page_size, 25);
        assert_eq!(config.settings.report_timeout(), Duration::from_secs(15));
        assert!(config.current_user.is_none());
    }

    #[test]
    fn test_current_user_table() {
        let config = Config::from_toml(
            "[settings]\npage_size = 50\n\n[current_user]\nid = 7\nname = \"Admin\"\nrole = \"admin\"\n",
        )
        .unwrap();
        let user = config.current_user.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(config.settings.page_size, 50);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            api_url: Some("https://old.example.com".into()),
            ..Default::default()
        };
        config.apply_env_overrides(|key| match key {
            ENV_API_URL => Some("https://new.example.com".into()),
            ENV_API_TOKEN => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.api_url.as_deref(), Some("https://new.example.com"));
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_missing_url_is_an_error() {
        assert!(Config::default().api_url().is_err());
    }
}
