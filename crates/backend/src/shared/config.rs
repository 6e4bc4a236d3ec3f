use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Published CSV export of the room spreadsheet. Empty = not configured.
    #[serde(default)]
    pub csv_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_dist_dir() -> String {
    "dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
bind = "0.0.0.0:3000"

[source]
csv_url = ""
timeout_secs = 15

[frontend]
dist_dir = "dist"
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

/// Directory of the built frontend.
/// Relative paths are resolved against the executable directory when the
/// directory exists there, otherwise against the current directory.
pub fn get_dist_dir(config: &Config) -> PathBuf {
    let dist = Path::new(&config.frontend.dist_dir);

    if dist.is_absolute() {
        return dist.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(dist);
            if resolved.is_dir() {
                return resolved;
            }
        }
    }

    dist.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert!(config.source.csv_url.is_empty());
        assert_eq!(config.source.timeout_secs, 15);
        assert_eq!(config.frontend.dist_dir, "dist");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
[source]
csv_url = "https://docs.google.com/spreadsheets/d/e/x/pub?output=csv"
"#,
        )
        .unwrap();
        assert_eq!(config.source.timeout_secs, 15);
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert!(config.source.csv_url.ends_with("output=csv"));
    }

    #[test]
    fn test_absolute_dist_dir_kept() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let absolute = std::env::temp_dir().join("room-board-dist");
        config.frontend.dist_dir = absolute.display().to_string();
        assert_eq!(get_dist_dir(&config), absolute);
    }
}
