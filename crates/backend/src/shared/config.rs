//! Service configuration loaded from `config.toml`

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub stock: StockConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StockConfig {
    /// Locations created at startup
    #[serde(default)]
    pub locations: Vec<LocationConfig>,
    /// Stock adjustment file applied at startup (`productId,change,location` per line)
    #[serde(default)]
    pub upload_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    pub code: String,
    pub name: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[stock]
locations = [
    { code = "S0", name = "Store 0" },
    { code = "S1", name = "Store 1" },
    { code = "S2", name = "Store 2" },
    { code = "S3", name = "Store 3" },
]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolve the upload file path; relative paths are taken from the executable directory
pub fn get_upload_path(config: &Config) -> Option<PathBuf> {
    let raw = config.stock.upload_file.as_deref()?;
    let path = Path::new(raw);

    if path.is_absolute() {
        return Some(path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Some(exe_dir.join(path));
        }
    }

    Some(PathBuf::from(raw))
}
