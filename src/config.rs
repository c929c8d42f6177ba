use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigStatus {
    Pending,
    Accepted,
    Delivered,
    All,
}

/// Defaults read from `config.toml`; command-line flags always win
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Restaurant display name used when `--restaurant` is absent
    #[serde(default)]
    pub(crate) restaurant: Option<String>,
    /// Orders file, directory, or "-" for stdin
    #[serde(default)]
    pub(crate) input: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<ConfigStatus>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) no_color: bool,
}

impl Config {
    /// Load `explicit` if given, otherwise the first parseable file in the default locations
    pub(crate) fn load(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::load_file(path).unwrap_or_default();
        }

        Self::get_config_paths()
            .iter()
            .filter(|path| path.exists())
            .find_map(|path| Self::load_file(path))
            .unwrap_or_default()
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config");
                return None;
            }
        };
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config");
                None
            }
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/orderstats/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("orderstats").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/orderstats/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("orderstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.orderstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".orderstats.toml"));
        }

        paths
    }
}
