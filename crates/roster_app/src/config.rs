use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use roster_core::{RefreshPolicy, StoreSettings, DEFAULT_PAGE_SIZE};
use roster_engine::{SourceSettings, DEFAULT_BASE_URL};
use roster_logging::roster_info;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILENAME: &str = "roster.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshMode {
    Staged,
    ResetBeforeFetch,
}

impl From<RefreshMode> for RefreshPolicy {
    fn from(mode: RefreshMode) -> Self {
        match mode {
            RefreshMode::Staged => RefreshPolicy::Staged,
            RefreshMode::ResetBeforeFetch => RefreshPolicy::ResetBeforeFetch,
        }
    }
}

/// Settings read from `roster.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: u32,
    pub seed: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub refresh_policy: RefreshMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        let source = SourceSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            seed: None,
            connect_timeout_secs: source.connect_timeout.as_secs(),
            request_timeout_secs: source.request_timeout.as_secs(),
            max_response_bytes: source.max_bytes,
            refresh_policy: RefreshMode::Staged,
        }
    }
}

impl AppConfig {
    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            base_url: self.base_url.clone(),
            seed: self.seed.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_response_bytes,
        }
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            page_size: self.page_size,
            refresh_policy: self.refresh_policy.into(),
        }
    }

    /// How long the shell waits for one fetch before giving up on it.
    pub fn response_wait(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .saturating_add(self.connect_timeout_secs)
                .saturating_add(1),
        )
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        Ok(())
    }
}

/// Loads configuration from `explicit`, or from `roster.ron` in the working
/// directory when no path is given. Only a missing default file falls back
/// to defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match explicit {
        Some(path) => read_config(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILENAME);
            if path.exists() {
                read_config(path)?
            } else {
                AppConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: AppConfig = ron::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    roster_info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("roster.ron");
        fs::write(
            &path,
            r#"(page_size: 10, seed: Some("demo"), refresh_policy: ResetBeforeFetch)"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.seed.as_deref(), Some("demo"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.store_settings().refresh_policy,
            RefreshPolicy::ResetBeforeFetch
        );
        assert_eq!(config.source_settings().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(Some(&temp.path().join("absent.ron"))).unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("roster.ron");
        fs::write(&path, "(page_size: \"many\")").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("roster.ron");
        fs::write(&path, "(page_size: 0)").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn huge_timeouts_saturate_the_response_wait() {
        let config = AppConfig {
            connect_timeout_secs: u64::MAX,
            request_timeout_secs: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.response_wait(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn defaults_match_reference_deployment() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.store_settings().refresh_policy, RefreshPolicy::Staged);
        assert_eq!(config.source_settings().max_bytes, 5 * 1024 * 1024);
    }
}
