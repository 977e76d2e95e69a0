// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use daycal_core::{APP_NAME, Config as CoreConfig};

const DAYCAL_CONFIG_ENV: &str = "DAYCAL_CONFIG";
const DAYCAL_DEV_ENV: &str = "DAYCAL_DEV";

const DAYCAL_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const DAYCAL_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Loads the configuration, see [`config_path`] for the lookup order.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<CoreConfig, Box<dyn Error>> {
    let mut config = match config_path(path)? {
        Some(path) => fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
            .parse::<ConfigRaw>()
            .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e))?
            .core,
        None => {
            tracing::debug!("no config file found, using defaults");
            CoreConfig::default()
        }
    };

    config.normalize()?;
    Ok(config)
}

/// Resolves the config file: the `--config` flag, then `DAYCAL_CONFIG`, then
/// the default location. `None` when the default file does not exist or when
/// development mode skips the default location.
fn config_path(path: Option<PathBuf>) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if let Some(path) = path {
        return Ok(Some(path));
    } else if let Ok(env_path) = std::env::var(DAYCAL_CONFIG_ENV) {
        return Ok(Some(PathBuf::from(env_path)));
    }

    if let Some(true) = is_dev_mode() {
        tracing::info!("{DAYCAL_DEV_ENV} is set, skipping the default config location");
        return Ok(None);
    }

    let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
    Ok(config.exists().then_some(config))
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(DAYCAL_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if DAYCAL_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if DAYCAL_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            DAYCAL_DEV_ENV,
            val,
            DAYCAL_DEV_VALID_TRUE.join(", "),
            DAYCAL_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
