use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analytics::sides::SidePolicy;
use crate::analytics::trends::DEFAULT_WINDOW_DAYS;
use crate::analytics::AnalyticsOptions;

pub const HOME_ENV: &str = "MATLOG_HOME";
const CONFIG_FILE_NAME: &str = "config.toml";
/// A century of sessions; longer windows are capped to this.
pub const MAX_RECENT_WINDOW_DAYS: i64 = 36_500;

/// Resolved data directory plus the parsed settings file.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: Settings,
}

/// Parsed from `<data_dir>/config.toml` (all fields have defaults)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Length of the "top techniques" lists.
    pub top_n: usize,
    pub pie_slices: usize,
    pub recent_window_days: i64,
    pub side_policy: SidePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_n: 5,
            pie_slices: 6,
            recent_window_days: DEFAULT_WINDOW_DAYS,
            side_policy: SidePolicy::Compat,
        }
    }
}

impl Settings {
    /// Replaces out-of-range values with usable ones, warning about each.
    pub fn sanitized(mut self) -> Self {
        if self.recent_window_days < 0 {
            warn!(
                "recent_window_days = {} is negative, using {}",
                self.recent_window_days,
                DEFAULT_WINDOW_DAYS
            );
            self.recent_window_days = DEFAULT_WINDOW_DAYS;
        } else if self.recent_window_days > MAX_RECENT_WINDOW_DAYS {
            warn!(
                "recent_window_days = {} is too large, using {}",
                self.recent_window_days,
                MAX_RECENT_WINDOW_DAYS
            );
            self.recent_window_days = MAX_RECENT_WINDOW_DAYS;
        }
        self
    }

    pub fn analytics_options(&self) -> AnalyticsOptions {
        AnalyticsOptions {
            side_policy: self.side_policy,
            pie_slices: self.pie_slices,
            recent_window_days: self.recent_window_days,
            ..AnalyticsOptions::default()
        }
    }
}

const DEFAULT_CONFIG_TOML: &str = r#"# matlog configuration

# Length of the "top techniques" lists
top_n = 5

# Slices per pie chart (the rest of the ranking is left out)
pie_slices = 6

# Days covered by the recent sessions view
recent_window_days = 28

# Where techniques logged without (L)/(R) are counted:
#   "compat" - counted as left
#   "strict" - counted separately as unmarked
side_policy = "compat"
"#;

impl Config {
    /// Resolves the data directory: explicit path, then `$MATLOG_HOME`, then `~/.matlog`.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match std::env::var_os(HOME_ENV) {
                Some(dir) => PathBuf::from(dir),
                None => dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?
                    .join(".matlog"),
            },
        };
        Self::from_dir(&data_dir)
    }

    pub fn from_dir(data_dir: &Path) -> Result<Self> {
        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            settings: Self::load_settings(data_dir),
        })
    }

    /// Falls back to defaults when the file is missing or malformed.
    fn load_settings(data_dir: &Path) -> Settings {
        let path = data_dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            match fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Settings>(&contents) {
                    Ok(settings) => return settings.sanitized(),
                    Err(e) => warn!("Failed to parse {}: {}", path.display(), e),
                },
                Err(e) => warn!("Failed to read {}: {}", path.display(), e),
            }
        }
        Settings::default()
    }

    /// Creates the data directory and a commented default config on first run.
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;

        let config_path = self.data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG_TOML)
                .context("Failed to write default config.toml")?;
            info!("Created {} with defaults", config_path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.pie_slices, 6);
        assert_eq!(settings.recent_window_days, 28);
        assert_eq!(settings.side_policy, SidePolicy::Compat);
    }

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed: Settings = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_partial_settings_parse() {
        let parsed: Settings = toml::from_str("side_policy = \"strict\"\ntop_n = 3\n").unwrap();
        assert_eq!(parsed.side_policy, SidePolicy::Strict);
        assert_eq!(parsed.top_n, 3);
        assert_eq!(parsed.pie_slices, 6);
    }

    #[test]
    fn test_ensure_dirs_writes_default_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let data_dir = temp_dir.path().join("nested");

        let config = Config::load(Some(data_dir.clone())).unwrap();
        config.ensure_dirs().unwrap();
        assert!(data_dir.join("config.toml").exists());

        let reloaded = Config::from_dir(&data_dir).unwrap();
        assert_eq!(reloaded.settings, Settings::default());
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("config.toml"), "top_n = \"many\"").unwrap();
        let config = Config::from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_window_out_of_range_is_clamped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "recent_window_days = 9223372036854775807\n").unwrap();
        let config = Config::from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.settings.recent_window_days, MAX_RECENT_WINDOW_DAYS);

        fs::write(&path, "recent_window_days = -7\ntop_n = 3\n").unwrap();
        let config = Config::from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.settings.recent_window_days, DEFAULT_WINDOW_DAYS);
        assert_eq!(config.settings.top_n, 3);

        fs::write(&path, "recent_window_days = 0\n").unwrap();
        let config = Config::from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.settings.recent_window_days, 0);
    }

    #[test]
    fn test_options_follow_settings() {
        let settings = Settings {
            side_policy: SidePolicy::Strict,
            pie_slices: 5,
            ..Settings::default()
        };
        let options = settings.analytics_options();
        assert_eq!(options.side_policy, SidePolicy::Strict);
        assert_eq!(options.pie_slices, 5);
        assert_eq!(options.recent_window_days, 28);
    }
}
